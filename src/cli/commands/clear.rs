use super::super::{ClearArgs, Ctx};
use crate::Result;
use crate::app::{Action, App, Outcome, render_cleared};
use crate::store::KvStore;

pub(crate) fn handle<S: KvStore>(app: &mut App<S>, ctx: &Ctx, args: ClearArgs) -> Result<()> {
    let count = app.view().totals.count;
    if !args.force {
        println!("refusing to clear {count} projects; pass --force to confirm");
        return Ok(());
    }

    match app.dispatch(Action::ClearAll)? {
        Outcome::Cleared(count) => {
            if ctx.json {
                println!("{}", serde_json::json!({ "cleared": count }));
            } else {
                println!("{}", render_cleared(count));
            }
            Ok(())
        }
        other => unreachable!("clear produced {other:?}"),
    }
}
