use super::super::Ctx;
use crate::Result;
use crate::app::{Action, App, Outcome, render_list};
use crate::store::KvStore;

pub(crate) fn handle<S: KvStore>(app: &mut App<S>, ctx: &Ctx) -> Result<()> {
    match app.dispatch(Action::Seed)? {
        Outcome::Seeded(count) => {
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(app.view())?);
            } else {
                println!("✓ Seeded {count} sample projects\n");
                println!("{}", render_list(app.view()));
            }
            Ok(())
        }
        other => unreachable!("seed produced {other:?}"),
    }
}
