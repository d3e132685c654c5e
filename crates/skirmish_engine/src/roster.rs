use std::sync::Arc;

use crate::catalog::{UnitCatalog, UnitTemplate};
use crate::error::BattleResult;
use crate::unit::Unit;

/// Resolves every name against the catalog without creating any units.
pub fn resolve_templates<S: AsRef<str>>(
    names: &[S],
    catalog: &UnitCatalog,
) -> BattleResult<Vec<Arc<UnitTemplate>>> {
    names
        .iter()
        .map(|name| catalog.resolve(name.as_ref()))
        .collect()
}

/// Builds fresh, full-health units for a roster.
///
/// All names are resolved first, so an unknown name fails before a single
/// unit exists.
pub fn instantiate<S: AsRef<str>>(names: &[S], catalog: &UnitCatalog) -> BattleResult<Vec<Unit>> {
    let templates = resolve_templates(names, catalog)?;
    Ok(templates.into_iter().map(Unit::new).collect())
}
