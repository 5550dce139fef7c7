use super::super::Ctx;
use crate::Result;
use crate::app::{App, render_totals};
use crate::store::KvStore;

pub(crate) fn handle<S: KvStore>(app: &mut App<S>, ctx: &Ctx) -> Result<()> {
    let totals = app.view().totals;
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&totals)?);
    } else {
        println!("{}", render_totals(&totals));
    }
    Ok(())
}
