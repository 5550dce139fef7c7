use super::super::Ctx;
use crate::Result;
use crate::app::{App, ItemView, render_detail, render_not_found};
use crate::core::ProjectId;
use crate::store::KvStore;

pub(crate) fn handle<S: KvStore>(app: &mut App<S>, ctx: &Ctx, raw_id: &str) -> Result<()> {
    let id = ProjectId::parse(raw_id)?;
    match app.get(&id) {
        Some(project) => {
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&project)?);
            } else {
                println!("{}", render_detail(&ItemView::from_project(&project)));
            }
        }
        None => println!("{}", render_not_found(id.as_str())),
    }
    Ok(())
}
