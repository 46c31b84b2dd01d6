use sea_orm::sea_query::LikeExpr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

/// Escape LIKE wildcards so the search term only ever matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Unicode-aware check behind every name search. SQLite's LIKE only folds ASCII,
/// so rows coming back from [`apply_text_search`] still go through this.
pub fn name_matches(name: &str, search_term: &str) -> bool {
    name.to_lowercase().contains(&search_term.to_lowercase())
}

/// Narrow a query with a case-insensitive substring match on a single column using
/// SQLite's LIKE operator. Only ASCII terms are pushed into SQL; an empty or
/// non-ASCII term leaves the query untouched and [`name_matches`] does the filtering.
pub fn apply_text_search<T, C>(
    query: sea_orm::Select<T>,
    column: C,
    search_term: &str,
) -> sea_orm::Select<T>
where
    T: EntityTrait,
    C: ColumnTrait,
{
    if search_term.is_empty() || !search_term.is_ascii() {
        return query;
    }

    // SQLite's LIKE is case-insensitive for ASCII characters by default
    let pattern = format!("%{}%", escape_like(search_term));
    query.filter(column.like(LikeExpr::new(pattern).escape('\\')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_plain_term() {
        assert_eq!(escape_like("Hop"), "Hop");
    }

    #[test]
    fn test_name_matches_folds_unicode_case() {
        assert!(name_matches("Café Élysée", "élysée"));
        assert!(name_matches("Café Élysée", "ÉLYSÉE"));
        assert!(name_matches("Café Élysée", "CAFÉ"));
        assert!(!name_matches("Café Élysée", "cafe"));
    }

    #[test]
    fn test_name_matches_wildcards_are_literal() {
        assert!(name_matches("100% Jazz", "0% j"));
        assert!(!name_matches("The Musical Hop", "m_sical"));
    }

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("100%_off"), "100\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
