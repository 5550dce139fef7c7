//! Render pipeline: projects the sorted collection into a display tree,
//! plus the plain-text renderer over that tree.
//!
//! The projection is pure and free of terminal vocabulary; the controller
//! rebuilds it after every mutation and on initial load. Handlers that
//! need machine output serialize the same tree as JSON.

use serde::{Deserialize, Serialize};

use crate::core::{Collection, Project, SortKey, Totals, aggregate, sorted};

/// Message shown when the collection is empty.
pub const EMPTY_MESSAGE: &str = "No projects yet.";

/// The rendered list: one node per record in display order, plus the
/// aggregate footer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListView {
    pub nodes: Vec<Node>,
    pub totals: Totals,
    pub sort: Option<SortKey>,
}

/// One display node. An empty collection renders as exactly one
/// `Empty` node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Empty { message: String },
    Item(ItemView),
}

/// Projection of one record. `id` doubles as the edit and delete
/// affordance; `thumbnail` is present exactly when the record has image
/// data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
    pub id: String,
    pub title: String,
    pub favorite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub hours: f64,
    pub cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl ItemView {
    pub fn from_project(p: &Project) -> Self {
        Self {
            id: p.id.to_string(),
            title: p.display_title().to_string(),
            favorite: p.favorite,
            series: p.series.clone(),
            category: p.category.clone(),
            status: p.status.clone(),
            hours: p.hours,
            cost: p.cost,
            date: p.date.clone(),
            materials: p.materials.clone(),
            thumbnail: p.image_data.clone(),
        }
    }
}

/// Build the display tree for the collection under the given sort key.
pub fn build_view(collection: &Collection, sort: Option<SortKey>) -> ListView {
    let nodes = if collection.is_empty() {
        vec![Node::Empty {
            message: EMPTY_MESSAGE.to_string(),
        }]
    } else {
        sorted(collection, sort)
            .iter()
            .map(|p| Node::Item(ItemView::from_project(p)))
            .collect()
    };
    ListView {
        nodes,
        totals: aggregate(collection),
        sort,
    }
}

// -----------------------------------------------------------------------------
// Text rendering (used by the CLI handlers)
// -----------------------------------------------------------------------------

pub fn render_list(view: &ListView) -> String {
    let mut out = String::new();
    for node in &view.nodes {
        match node {
            Node::Empty { message } => {
                out.push_str(message);
                out.push('\n');
            }
            Node::Item(item) => {
                out.push_str(&render_item_line(item));
                out.push('\n');
            }
        }
    }
    out.push_str(&render_totals(&view.totals));
    out
}

fn render_item_line(item: &ItemView) -> String {
    let star = if item.favorite { "★ " } else { "" };
    let mut meta: Vec<String> = Vec::new();
    if let Some(series) = &item.series {
        meta.push(series.clone());
    }
    if let Some(category) = &item.category {
        meta.push(category.clone());
    }
    if let Some(status) = &item.status {
        meta.push(status.clone());
    }
    meta.push(format!("{}h", trim_num(item.hours)));
    meta.push(format!("${}", trim_num(item.cost)));
    if let Some(date) = &item.date {
        meta.push(date.clone());
    }

    let mut line = format!("{}  {star}{}  [{}]", item.id, item.title, meta.join(", "));
    if item.thumbnail.is_some() {
        line.push_str("  (image)");
    }
    if let Some(materials) = &item.materials {
        line.push_str(&format!("\n         materials: {materials}"));
    }
    line
}

pub fn render_detail(item: &ItemView) -> String {
    let mut out = format!("{}{}\n", if item.favorite { "★ " } else { "" }, item.title);
    out.push_str(&format!("  id: {}\n", item.id));
    if let Some(series) = &item.series {
        out.push_str(&format!("  series: {series}\n"));
    }
    if let Some(category) = &item.category {
        out.push_str(&format!("  category: {category}\n"));
    }
    if let Some(status) = &item.status {
        out.push_str(&format!("  status: {status}\n"));
    }
    out.push_str(&format!("  hours: {}\n", trim_num(item.hours)));
    out.push_str(&format!("  cost: {}\n", trim_num(item.cost)));
    if let Some(date) = &item.date {
        out.push_str(&format!("  date: {date}\n"));
    }
    if let Some(materials) = &item.materials {
        out.push_str(&format!("  materials: {materials}\n"));
    }
    if let Some(thumb) = &item.thumbnail {
        out.push_str(&format!("  image: {}\n", summarize_data_uri(thumb)));
    }
    out.trim_end().to_string()
}

pub fn render_totals(totals: &Totals) -> String {
    format!(
        "{} projects, {}h total, ${} total",
        totals.count,
        trim_num(totals.total_hours),
        trim_num(totals.total_cost)
    )
}

pub fn render_saved(p: &Project, created: bool) -> String {
    let verb = if created { "Created" } else { "Updated" };
    format!("✓ {verb} project {}: {}", p.id, p.display_title())
}

pub fn render_deleted(id: &str) -> String {
    format!("✓ Deleted project {id}")
}

pub fn render_not_found(id: &str) -> String {
    format!("No project with id {id}")
}

pub fn render_cleared(count: usize) -> String {
    format!("✓ Cleared {count} projects")
}

/// "12.5" / "12", matching how the numbers were likely entered.
fn trim_num(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Data URIs embed whole files; show the type and size, not the payload.
fn summarize_data_uri(uri: &str) -> String {
    let mime = uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .unwrap_or("unknown");
    format!("{mime}, {} chars", uri.len())
}
