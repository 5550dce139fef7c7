//! The form draft: raw field values as entered, and their coercion into
//! a record.

use std::path::PathBuf;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::core::{Project, ProjectId, coerce_non_negative};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Raw user input for one submit. Numeric fields stay strings here;
/// coercion happens once, at build time, under the same rule the store
/// applies on load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectDraft {
    pub character: String,
    pub series: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub hours: Option<String>,
    pub cost: Option<String>,
    pub date: Option<String>,
    pub favorite: bool,
    pub materials: Option<String>,
    /// File chosen for encoding this submit. Never pre-filled on edit;
    /// leaving it empty is the "retain stored image" path.
    pub image_path: Option<PathBuf>,
}

impl ProjectDraft {
    /// Pre-fill a draft from an existing record for editing. The image
    /// path intentionally stays empty.
    pub fn from_project(p: &Project) -> Self {
        Self {
            character: p.character.clone(),
            series: p.series.clone(),
            category: p.category.clone(),
            status: p.status.clone(),
            hours: Some(trim_float(p.hours)),
            cost: Some(trim_float(p.cost)),
            date: p.date.clone(),
            favorite: p.favorite,
            materials: p.materials.clone(),
            image_path: None,
        }
    }

    /// Build the record for this submit. `image_data` is whatever the
    /// controller resolved: a freshly encoded string, the retained stored
    /// one, or nothing.
    pub fn build(&self, id: ProjectId, image_data: Option<String>) -> Project {
        Project {
            id,
            character: self.character.trim().to_string(),
            series: clean(&self.series),
            category: clean(&self.category),
            status: clean(&self.status),
            hours: coerce_non_negative(self.hours.as_deref()),
            cost: coerce_non_negative(self.cost.as_deref()),
            date: clean(&self.date).map(|d| canonicalize_date(&d)),
            favorite: self.favorite,
            materials: clean(&self.materials),
            image_data,
        }
    }
}

fn clean(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// `12.5` renders as "12.5", `12.0` as "12".
fn trim_float(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Canonicalize to zero-padded `YYYY-MM-DD` when the input parses as a
/// real calendar date (unpadded components accepted); anything else is
/// kept verbatim.
fn canonicalize_date(raw: &str) -> String {
    parse_loose_date(raw)
        .and_then(|d| d.format(DATE_FORMAT).ok())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_loose_date(raw: &str) -> Option<time::Date> {
    let mut parts = raw.splitn(3, '-');
    let year: i32 = parts.next()?.trim().parse().ok()?;
    let month: u8 = parts.next()?.trim().parse().ok()?;
    let day: u8 = parts.next()?.trim().parse().ok()?;
    let month = time::Month::try_from(month).ok()?;
    time::Date::from_calendar_date(year, month, day).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_coerces_numeric_strings() {
        let draft = ProjectDraft {
            character: "Aloy".into(),
            hours: Some("10".into()),
            cost: Some("".into()),
            ..Default::default()
        };
        let p = draft.build(ProjectId::generate(), None);
        assert_eq!(p.hours, 10.0);
        assert_eq!(p.cost, 0.0);
    }

    #[test]
    fn build_trims_and_drops_empty_text() {
        let draft = ProjectDraft {
            character: "  Aloy  ".into(),
            series: Some("  ".into()),
            status: Some(" done ".into()),
            ..Default::default()
        };
        let p = draft.build(ProjectId::generate(), None);
        assert_eq!(p.character, "Aloy");
        assert_eq!(p.series, None);
        assert_eq!(p.status.as_deref(), Some("done"));
    }

    #[test]
    fn build_canonicalizes_parseable_dates() {
        let draft = ProjectDraft {
            date: Some("2026-3-7".into()),
            ..Default::default()
        };
        let p = draft.build(ProjectId::generate(), None);
        assert_eq!(p.date.as_deref(), Some("2026-03-07"));
    }

    #[test]
    fn build_keeps_unparseable_dates_verbatim() {
        let draft = ProjectDraft {
            date: Some("sometime in spring".into()),
            ..Default::default()
        };
        let p = draft.build(ProjectId::generate(), None);
        assert_eq!(p.date.as_deref(), Some("sometime in spring"));
    }

    #[test]
    fn build_keeps_impossible_dates_verbatim() {
        let draft = ProjectDraft {
            date: Some("2026-13-40".into()),
            ..Default::default()
        };
        let p = draft.build(ProjectId::generate(), None);
        assert_eq!(p.date.as_deref(), Some("2026-13-40"));
    }

    #[test]
    fn from_project_roundtrips_through_build() {
        let mut original = Project::new("Aloy");
        original.series = Some("Horizon".into());
        original.hours = 12.5;
        original.cost = 40.0;
        original.favorite = true;
        original.image_data = Some("data:image/png;base64,x".into());

        let draft = ProjectDraft::from_project(&original);
        assert!(draft.image_path.is_none());
        assert_eq!(draft.hours.as_deref(), Some("12.5"));
        assert_eq!(draft.cost.as_deref(), Some("40"));

        let rebuilt = draft.build(original.id.clone(), original.image_data.clone());
        assert_eq!(rebuilt, original);
    }
}
