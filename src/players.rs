use crate::error::Result;
use crate::kol::{PlayerId, PlayerSearch};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Looks up the player id of each name. Search is fuzzy, so only a result
/// whose name matches exactly (ignoring case) counts. Names without one
/// are left out of the result.
pub fn resolve_identifiers<I, S>(names: I, search: &S) -> Result<BTreeMap<String, PlayerId>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    S: PlayerSearch + ?Sized,
{
    let mut ids = BTreeMap::new();
    for name in names {
        let name = name.as_ref().to_lowercase();
        let found = search
            .search(&name)?
            .into_iter()
            .find(|player| player.user_name.to_lowercase() == name);
        match found {
            Some(player) => {
                debug!("{} is player #{}", name, player.user_id);
                ids.insert(name, player.user_id);
            }
            None => warn!("No player named {:?}, skipping", name),
        }
    }
    Ok(ids)
}
