use super::*;
use crate::config::RepositoryConfig;
use crate::error::BrowserError;
use std::collections::HashSet;
use std::sync::Arc;

/// Helper to create a test record with minimal required fields
fn record(title: &str, filename: &str, category: Category) -> ScriptRecord {
    ScriptRecord::new(title, filename, category)
}

fn index_of(records: Vec<ScriptRecord>) -> CategoryIndex {
    CategoryIndex::build(records.into_iter().map(Arc::new).collect())
}

fn titles(records: &[Arc<ScriptRecord>]) -> Vec<&str> {
    records.iter().map(|r| r.title.as_str()).collect()
}

fn sample_index() -> CategoryIndex {
    index_of(vec![
        record("Zombies", "zombies.lua", Category::CustomGames),
        record("Admin Tools", "admin_tools.lua", Category::Utility)
            .with_description("Commands for server administrators"),
        record("Rank System", "rank_system.lua", Category::Attractive)
            .with_short_description("Persistent player ranks"),
        record("Anti Camp", "anti_camp.lua", Category::Utility),
        record("Kill Messages", "kill_messages.lua", Category::Attractive),
    ])
}

// ============================================
// SCRIPT RECORD
// ============================================

#[test]
fn test_filename_without_extension_strips_lua() {
    let r = record("Script", "script.lua", Category::Utility);
    assert_eq!(r.filename_without_extension(), Some("script"));
}

#[test]
fn test_filename_without_extension_keeps_other_names() {
    let r = record("Readme", "README.md", Category::Utility);
    assert_eq!(r.filename_without_extension(), Some("README.md"));

    let r = record("Lua in middle", "my.lua.backup", Category::Utility);
    assert_eq!(r.filename_without_extension(), Some("my.lua.backup"));
}

#[test]
fn test_filename_without_extension_absent_filename() {
    let r = ScriptRecord {
        filename: None,
        ..record("No File", "x.lua", Category::Utility)
    };
    assert_eq!(r.filename_without_extension(), None);
}

#[test]
fn test_urls_use_category_folder() {
    let repo = RepositoryConfig::default();
    let r = record("Zombies", "zombies.lua", Category::CustomGames);
    assert_eq!(
        r.canonical_url(&repo).unwrap(),
        "https://github.com/Chalwk/HALO-SCRIPT-PROJECTS/blob/master/sapp/custom_games/zombies.lua"
    );
    assert_eq!(
        r.raw_content_url(&repo).unwrap(),
        "https://raw.githubusercontent.com/Chalwk/HALO-SCRIPT-PROJECTS/master/sapp/custom_games/zombies.lua"
    );
}

#[test]
fn test_urls_require_filename() {
    let r = ScriptRecord {
        filename: None,
        ..record("Broken", "x.lua", Category::Utility)
    };
    let err = r.raw_content_url(&RepositoryConfig::default()).unwrap_err();
    assert!(matches!(err, BrowserError::MissingFilename { title } if title == "Broken"));
}

#[test]
fn test_details_text_layout() {
    let r = record("Admin Tools", "admin_tools.lua", Category::Utility)
        .with_description("Commands for admins");
    assert_eq!(
        r.details_text(),
        "Title: Admin Tools\n\nCategory: Utility\n\nFilename: admin_tools.lua\n\nDescription:\nCommands for admins"
    );
}

// ============================================
// FUZZY MATCH
// ============================================

#[test]
fn test_fuzzy_match_subsequence() {
    assert!(fuzzy_match("zombies", "zmbi"));
    assert!(fuzzy_match("zombies", "zombies"));
    assert!(!fuzzy_match("zombies", "zmbx"));
    assert!(!fuzzy_match("zombies", "sz"));
}

#[test]
fn test_fuzzy_match_empty_inputs() {
    assert!(fuzzy_match("anything", ""));
    assert!(fuzzy_match("", ""));
    assert!(!fuzzy_match("", "a"));
}

#[test]
fn test_fuzzy_match_is_case_sensitive_on_raw_input() {
    // callers lower-case both sides first
    assert!(!fuzzy_match("Zombies", "z"));
}

// ============================================
// QUERY NORMALIZATION
// ============================================

#[test]
fn test_query_parse_trims_lowercases_and_splits() {
    let q = SearchQuery::parse("  Admin \t  TOOLS\n");
    assert_eq!(q.terms(), ["admin".to_string(), "tools".to_string()]);
}

#[test]
fn test_query_parse_blank_is_empty() {
    assert!(SearchQuery::parse("").is_empty());
    assert!(SearchQuery::parse("   \t ").is_empty());
}

// ============================================
// SCORE / MATCHES
// ============================================

#[test]
fn test_empty_query_matches_everything_with_zero_score() {
    let q = SearchQuery::parse("");
    let r = record("Zombies", "zombies.lua", Category::CustomGames);
    assert!(matches(&r, &q));
    assert_eq!(score(&r, &q), 0);
}

#[test]
fn test_exact_title_and_filename_score() {
    // title "zombies" == term: exact 100 + contains 50 + fuzzy 3
    // filename "zombies" == term: exact 100 + contains 50 + fuzzy 3
    // category "custom games" does not contain "zombies"
    let r = record("Zombies", "zombies.lua", Category::CustomGames);
    let q = SearchQuery::parse("zombies");
    assert_eq!(score(&r, &q), 306);
    assert!(score(&r, &q) >= 100 * q.terms().len() as i32);
}

#[test]
fn test_exact_filename_only_scores_at_least_100_per_term() {
    let r = record("Team Balance", "balance.lua", Category::Utility);
    let q = SearchQuery::parse("BALANCE");
    assert!(score(&r, &q) >= 100);
}

#[test]
fn test_admin_example_only_second_record_matches() {
    let zombies = record("Zombies", "zombies.lua", Category::Utility);
    let admin = record("Admin Tools", "admin_tools.lua", Category::Utility);
    let q = SearchQuery::parse("admin");

    assert!(!matches(&zombies, &q));
    assert!(matches(&admin, &q));
    assert!(score(&admin, &q) >= 50);

    let index = index_of(vec![zombies, admin]);
    let results = filter(&index, CategoryFilter::Only(Category::Utility), "admin");
    assert_eq!(titles(&results), vec!["Admin Tools"]);
}

#[test]
fn test_fuzzy_title_counts_toward_matches() {
    let r = record("Zombies", "undead.lua", Category::CustomGames);
    let q = SearchQuery::parse("zmbi");
    assert!(matches(&r, &q));
    // fuzzy title only
    assert_eq!(score(&r, &q), 3);
}

#[test]
fn test_fuzzy_description_scores_but_does_not_match() {
    let r = record("Zombies", "zombies.lua", Category::CustomGames)
        .with_description("spawns extra vehicles");
    // "svh" is a subsequence of the description only
    let q = SearchQuery::parse("svh");
    assert!(!matches(&r, &q));
    assert_eq!(score(&r, &q), 1);
}

#[test]
fn test_contains_weights_per_field() {
    let r = record("Alpha", "alpha.lua", Category::Utility)
        .with_description("has the word beacon")
        .with_short_description("beacon summary");
    let q = SearchQuery::parse("beacon");
    // description contains 10 + short contains 10 + description fuzzy 1
    assert_eq!(score(&r, &q), 21);
    assert!(matches(&r, &q));
}

#[test]
fn test_category_contains_scores_and_matches() {
    let r = record("Alpha", "alpha.lua", Category::CustomGames);
    let q = SearchQuery::parse("games");
    assert!(matches(&r, &q));
    assert_eq!(score(&r, &q), 5);
}

#[test]
fn test_every_term_must_match() {
    let r = record("Admin Tools", "admin_tools.lua", Category::Utility);
    assert!(matches(&r, &SearchQuery::parse("admin tools")));
    assert!(!matches(&r, &SearchQuery::parse("admin qqq")));
}

#[test]
fn test_scores_sum_over_terms() {
    let r = record("Admin Tools", "admin_tools.lua", Category::Utility);
    let single_a = score(&r, &SearchQuery::parse("admin"));
    let single_b = score(&r, &SearchQuery::parse("tools"));
    assert_eq!(score(&r, &SearchQuery::parse("admin tools")), single_a + single_b);
}

#[test]
fn test_missing_optional_fields_never_error() {
    let r = ScriptRecord {
        title: "Bare".to_string(),
        short_description: None,
        description: None,
        filename: None,
        category: Category::Attractive,
    };
    let q = SearchQuery::parse("bare xyz");
    assert!(!matches(&r, &q));
    assert!(score(&r, &q) > 0);
}

// ============================================
// CATEGORY INDEX
// ============================================

#[test]
fn test_index_buckets_by_category() {
    let index = sample_index();
    assert_eq!(index.len(), 5);
    assert_eq!(index.count(Category::Utility), 2);
    assert_eq!(index.count(Category::Attractive), 2);
    assert_eq!(index.count(Category::CustomGames), 1);
}

#[test]
fn test_index_missing_category_is_empty_slice() {
    let index = index_of(vec![record("A", "a.lua", Category::Utility)]);
    assert!(index.bucket(CategoryFilter::Only(Category::Attractive)).is_empty());
}

#[test]
fn test_stats_summary() {
    let index = sample_index();
    assert_eq!(
        index.stats().summary(2),
        "Total: 5 | Attractive: 2 | Custom Games: 1 | Utility: 2 | Showing: 2"
    );
}

// ============================================
// FILTER
// ============================================

#[test]
fn test_empty_query_sorts_by_title() {
    let index = sample_index();
    let results = filter(&index, CategoryFilter::All, "");
    assert_eq!(
        titles(&results),
        vec!["Admin Tools", "Anti Camp", "Kill Messages", "Rank System", "Zombies"]
    );
}

#[test]
fn test_empty_query_sort_is_case_sensitive() {
    let index = index_of(vec![
        record("alpha", "a.lua", Category::Utility),
        record("Beta", "b.lua", Category::Utility),
    ]);
    let results = filter(&index, CategoryFilter::All, "   ");
    // uppercase sorts before lowercase
    assert_eq!(titles(&results), vec!["Beta", "alpha"]);
}

#[test]
fn test_empty_query_equal_titles_keep_bucket_order() {
    let index = index_of(vec![
        record("Same", "second.lua", Category::Utility),
        record("Same", "first.lua", Category::Utility),
    ]);
    let results = filter(&index, CategoryFilter::All, "");
    let files: Vec<_> = results.iter().map(|r| r.filename.clone().unwrap()).collect();
    assert_eq!(files, vec!["second.lua", "first.lua"]);
}

#[test]
fn test_query_orders_by_score_descending() {
    let index = index_of(vec![
        record("Camp Guard", "guard.lua", Category::Utility).with_description("anti camp"),
        record("Anti Camp", "anti_camp.lua", Category::Utility),
    ]);
    let ranked = filter_ranked(&index, CategoryFilter::All, "camp");
    assert_eq!(ranked[0].record.title, "Anti Camp");
    assert!(ranked[0].score > ranked[1].score);
}

#[test]
fn test_ties_keep_bucket_order_not_alphabetical() {
    let index = index_of(vec![
        record("Zeta Spawn", "zeta.lua", Category::Utility),
        record("Alpha Spawn", "alpha.lua", Category::Utility),
    ]);
    let ranked = filter_ranked(&index, CategoryFilter::All, "spawn");
    assert_eq!(ranked[0].score, ranked[1].score);
    assert_eq!(ranked[0].record.title, "Zeta Spawn");
    assert_eq!(ranked[1].record.title, "Alpha Spawn");
}

#[test]
fn test_filter_is_idempotent() {
    let index = sample_index();
    let first = filter(&index, CategoryFilter::All, "a");
    let second = filter(&index, CategoryFilter::All, "a");
    assert_eq!(titles(&first), titles(&second));
}

#[test]
fn test_all_is_union_of_concrete_categories() {
    let index = sample_index();
    let all: Vec<_> = filter(&index, CategoryFilter::All, "")
        .into_iter()
        .map(|r| r.filename.clone().unwrap())
        .collect();

    let mut union = Vec::new();
    for category in Category::ALL {
        union.extend(
            filter(&index, CategoryFilter::Only(category), "")
                .into_iter()
                .map(|r| r.filename.clone().unwrap()),
        );
    }

    let all_set: HashSet<_> = all.iter().cloned().collect();
    let union_set: HashSet<_> = union.iter().cloned().collect();
    assert_eq!(all.len(), all_set.len());
    assert_eq!(all.len(), union.len());
    assert_eq!(all_set, union_set);
}

#[test]
fn test_empty_bucket_with_query_is_empty() {
    let index = index_of(vec![record("A", "a.lua", Category::Utility)]);
    assert!(filter(&index, CategoryFilter::Only(Category::CustomGames), "anything").is_empty());
    assert!(filter(&CategoryIndex::default(), CategoryFilter::All, "x").is_empty());
}

#[test]
fn test_filter_respects_category() {
    let index = sample_index();
    let results = filter(&index, CategoryFilter::Only(Category::Attractive), "r");
    assert!(results.iter().all(|r| r.category == Category::Attractive));
}

// ============================================
// LISTING
// ============================================

#[test]
fn test_parse_grouped_listing_in_category_order() {
    let json = r#"{
        "utility": [{"title": "Admin Tools", "filename": "admin_tools.lua", "description": "For admins"}],
        "attractive": [{"title": "Rank System", "filename": "rank_system.lua", "shortDescription": "Ranks"}]
    }"#;
    let records = parse_listing(json).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].category, Category::Attractive);
    assert_eq!(records[0].short_description.as_deref(), Some("Ranks"));
    assert_eq!(records[1].category, Category::Utility);
    assert_eq!(records[1].description.as_deref(), Some("For admins"));
}

#[test]
fn test_parse_flat_listing() {
    let json = r#"[
        {"title": "Zombies", "filename": "zombies.lua", "category": "custom_games"},
        {"title": "Anti Camp", "filename": "anti_camp.lua", "category": "Utility"}
    ]"#;
    let records = parse_listing(json).unwrap();
    assert_eq!(records[0].category, Category::CustomGames);
    assert_eq!(records[1].category, Category::Utility);
}

#[test]
fn test_parse_flat_listing_missing_category_fails() {
    let json = r#"[{"title": "Orphan", "filename": "orphan.lua"}]"#;
    let err = parse_listing(json).unwrap_err();
    assert!(matches!(err, BrowserError::MissingCategory { title } if title == "Orphan"));
}

#[test]
fn test_parse_grouped_listing_unknown_category_fails() {
    let json = r#"{"weapons": [{"title": "Rockets", "filename": "rockets.lua"}]}"#;
    let err = parse_listing(json).unwrap_err();
    assert!(matches!(err, BrowserError::UnknownCategory(name) if name == "weapons"));
}

#[test]
fn test_parse_listing_invalid_json_is_load_failure() {
    assert!(matches!(parse_listing("not json"), Err(BrowserError::LoadFailed(_))));
}

#[test]
fn test_parse_listing_blank_fields() {
    let json = r#"{"utility": [
        {"title": "  ", "filename": "fallback.lua", "description": ""},
        {"description": "nothing to show"}
    ]}"#;
    let records = parse_listing(json).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "fallback");
    assert_eq!(records[0].description, None);
}
