use directus_source::naming::{camel_case, pascal_case};

#[test]
fn test_camel_case_converts_snake_and_kebab_keys() {
    assert_eq!(camel_case("created_on"), "createdOn");
    assert_eq!(camel_case("foo-bar"), "fooBar");
    assert_eq!(camel_case("date_created_at"), "dateCreatedAt");
    assert_eq!(camel_case("id"), "id");
    assert_eq!(camel_case("_private_key"), "privateKey");
}

#[test]
fn test_camel_case_normalizes_acronyms() {
    assert_eq!(camel_case("userID"), "userId");
    assert_eq!(camel_case("XMLHttp"), "xmlHttp");
    assert_eq!(camel_case("ID"), "id");
    assert_eq!(camel_case("Title"), "title");
}

#[test]
fn test_camel_case_is_idempotent() {
    for key in ["created_on", "foo-bar", "userID", "hero_image_2x", "meta.title", "already_camelCase"] {
        let once = camel_case(key);
        assert_eq!(camel_case(&once), once, "camel_case not stable for {key}");
    }
}

#[test]
fn test_camel_case_leaves_no_separator_before_lowercase() {
    for key in ["created_on", "a-b-c", "snake__double", "trailing_", "mixed_Case-key"] {
        let converted = camel_case(key);
        let chars: Vec<char> = converted.chars().collect();
        for pair in chars.windows(2) {
            assert!(
                !((pair[0] == '_' || pair[0] == '-') && pair[1].is_lowercase()),
                "{key} -> {converted} kept a separator"
            );
        }
    }
}

#[test]
fn test_pascal_case_builds_type_names() {
    assert_eq!(pascal_case("blog_posts"), "BlogPosts");
    assert_eq!(pascal_case("authors"), "Authors");
    assert_eq!(pascal_case("BlogPosts"), "BlogPosts");
    assert_eq!(pascal_case("page-sections"), "PageSections");
}
