use super::output::{output_json, output_ndjson, output_table};
use super::people_window;
use crate::cli::CommonArgs;
use crate::identity::IdentityTable;
use crate::model::PeopleWindow;
use crate::session::Session;

pub fn exec(common: CommonArgs, windows: Vec<i64>, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let session = Session::load(&common)?;
    let windows = if windows.is_empty() {
        session.config.people_windows.clone()
    } else {
        windows
    };
    if let Some(days) = windows.iter().find(|d| **d < 0) {
        anyhow::bail!("window must not be negative, got {days}");
    }

    let mut identities = IdentityTable::from_snapshot(&session.snapshot);
    let results: Vec<PeopleWindow> = windows
        .iter()
        .map(|days| people_window(&session.snapshot.links, &mut identities, &session.window, *days))
        .collect();

    if json {
        output_json(&results, &session.window)?;
    } else if ndjson {
        output_ndjson(&results)?;
    } else {
        output_table(&results);
    }
    Ok(())
}
