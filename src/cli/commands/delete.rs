use super::super::Ctx;
use crate::Result;
use crate::app::{Action, App, Outcome, render_deleted, render_not_found};
use crate::core::ProjectId;
use crate::store::KvStore;

pub(crate) fn handle<S: KvStore>(app: &mut App<S>, ctx: &Ctx, raw_id: &str) -> Result<()> {
    let id = ProjectId::parse(raw_id)?;
    match app.dispatch(Action::Delete(id))? {
        Outcome::Deleted(id) => {
            if ctx.json {
                println!("{}", serde_json::json!({ "deleted": id.as_str() }));
            } else {
                println!("{}", render_deleted(id.as_str()));
            }
        }
        // Absent ids are a no-op, not an error.
        Outcome::NotFound(id) => println!("{}", render_not_found(id.as_str())),
        other => unreachable!("delete produced {other:?}"),
    }
    Ok(())
}
