use super::super::{Ctx, UpdateArgs};
use crate::Result;
use crate::app::{Action, App, Outcome, render_not_found, render_saved};
use crate::core::ProjectId;
use crate::store::KvStore;

pub(crate) fn handle<S: KvStore>(app: &mut App<S>, ctx: &Ctx, args: UpdateArgs) -> Result<()> {
    let id = ProjectId::parse(&args.id)?;

    // Preload fills the draft from the stored record; flags the user
    // passed then overwrite individual fields. Omitting --image is the
    // retain-stored-image path.
    let mut draft = match app.dispatch(Action::EditPreload(id))? {
        Outcome::Editing { draft } => draft,
        Outcome::NotFound(id) => {
            println!("{}", render_not_found(id.as_str()));
            return Ok(());
        }
        other => unreachable!("edit preload produced {other:?}"),
    };

    if let Some(character) = args.character {
        draft.character = character;
    }
    if args.series.is_some() {
        draft.series = args.series;
    }
    if args.category.is_some() {
        draft.category = args.category;
    }
    if args.status.is_some() {
        draft.status = args.status;
    }
    if args.hours.is_some() {
        draft.hours = args.hours;
    }
    if args.cost.is_some() {
        draft.cost = args.cost;
    }
    if args.date.is_some() {
        draft.date = args.date;
    }
    if let Some(favorite) = args.favorite {
        draft.favorite = favorite;
    }
    if args.materials.is_some() {
        draft.materials = args.materials;
    }
    draft.image_path = args.image;

    match app.dispatch(Action::Submit(draft))? {
        Outcome::Saved { project, created } => {
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&project)?);
            } else {
                println!("{}", render_saved(&project, created));
            }
            Ok(())
        }
        other => unreachable!("submit produced {other:?}"),
    }
}
