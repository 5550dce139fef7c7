use super::super::{AddArgs, Ctx};
use crate::Result;
use crate::app::{Action, App, Outcome, ProjectDraft, render_saved};
use crate::store::KvStore;

pub(crate) fn handle<S: KvStore>(app: &mut App<S>, ctx: &Ctx, args: AddArgs) -> Result<()> {
    let draft = ProjectDraft {
        character: args.character,
        series: args.series,
        category: args.category,
        status: args.status,
        hours: args.hours,
        cost: args.cost,
        date: args.date,
        favorite: args.favorite.unwrap_or(false),
        materials: args.materials,
        image_path: args.image,
    };

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
