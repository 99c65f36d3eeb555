use super::domain::{AdminLevel, Region, RegionCode};
use super::source::RegionDataSource;

/// The tracked region directly above `code`, if any.
pub fn navigate_up<'a>(source: &'a dyn RegionDataSource, code: &RegionCode) -> Option<&'a Region> {
    code.parent().and_then(|parent| source.region(&parent))
}

pub fn navigate_down<'a>(source: &'a dyn RegionDataSource, code: &RegionCode) -> Vec<&'a Region> {
    source.children(code)
}

pub fn siblings<'a>(source: &'a dyn RegionDataSource, code: &RegionCode) -> Vec<&'a Region> {
    source.siblings(code)
}

/// Path from the province down to `code` itself.
///
/// Ancestors the source does not track are left out. Empty when `code` is not
/// tracked.
pub fn breadcrumb<'a>(source: &'a dyn RegionDataSource, code: &RegionCode) -> Vec<&'a Region> {
    let Some(region) = source.region(code) else {
        return Vec::new();
    };

    let mut path: Vec<&Region> = code
        .ancestors()
        .iter()
        .filter_map(|ancestor| source.region(ancestor))
        .collect();
    path.push(region);
    path
}

/// Case-insensitive substring search over region names, optionally limited to
/// one administrative level. Results are ordered by level, then name.
///
/// A blank query matches nothing.
pub fn search_by_name<'a>(
    source: &'a dyn RegionDataSource,
    query: &str,
    level: Option<AdminLevel>,
) -> Vec<&'a Region> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<&Region> = source
        .regions()
        .filter(|region| level.map_or(true, |wanted| region.code.level() == wanted))
        .filter(|region| region.name.to_lowercase().contains(&needle))
        .collect();
    matches.sort_by(|a, b| {
        a.code
            .level()
            .cmp(&b.code.level())
            .then_with(|| a.name.cmp(&b.name))
    });
    matches
}

/// A region's neighbourhood in the administrative tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation<'a> {
    pub region: &'a Region,
    pub parent: Option<&'a Region>,
    pub children: Vec<&'a Region>,
    pub siblings: Vec<&'a Region>,
    pub breadcrumb: Vec<&'a Region>,
}

/// Collects every navigation view for a tracked region.
pub fn navigation<'a>(source: &'a dyn RegionDataSource, code: &RegionCode) -> Option<Navigation<'a>> {
    let region = source.region(code)?;
    Some(Navigation {
        region,
        parent: navigate_up(source, code),
        children: navigate_down(source, code),
        siblings: siblings(source, code),
        breadcrumb: breadcrumb(source, code),
    })
}
