/// Case-insensitive substring filter over `items`.
///
/// Always applied to the full listing, so shrinking the query widens the
/// result again. An empty query returns every item.
pub fn filter_by_name<T, F>(items: &[T], query: &str, name: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|&item| name(item).to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
