use serde_json::json;

use super::definition::{TypeOptions, ViewOverrides};
use crate::hooks::{CallbackPoint, Operation};

#[test]
fn test_view_overrides_fall_back_when_unset() {
    let views = ViewOverrides::default();
    assert_eq!(views.for_operation(Operation::Index), None);
    assert_eq!(views.for_operation(Operation::Edit), None);
}

#[test]
fn test_view_overrides_return_configured_template() {
    let views = ViewOverrides {
        index: Some("Articles/custom_index".to_string()),
        ..ViewOverrides::default()
    };
    assert_eq!(
        views.for_operation(Operation::Index),
        Some("Articles/custom_index")
    );
    assert_eq!(views.for_operation(Operation::View), None);
}

#[test]
fn test_empty_override_is_falsy() {
    let views = ViewOverrides {
        add: Some(String::new()),
        ..ViewOverrides::default()
    };
    assert_eq!(views.for_operation(Operation::Add), None);
}

#[test]
fn test_delete_never_has_an_override() {
    let views = ViewOverrides {
        index: Some("x".to_string()),
        view: Some("x".to_string()),
        add: Some("x".to_string()),
        edit: Some("x".to_string()),
    };
    assert_eq!(views.for_operation(Operation::Delete), None);
}

#[test]
fn test_type_options_builders_accumulate() {
    let options = TypeOptions::new()
        .with_menu(true)
        .with_model("Posts")
        .with_filter("status", json!("published"))
        .with_filter("author", json!("x"))
        .with_callback(CallbackPoint::FormFields, "post_form_fields")
        .with_api(true);

    assert_eq!(options.menu, Some(true));
    assert_eq!(options.model.as_deref(), Some("Posts"));
    let filters = options.filters.unwrap();
    let keys: Vec<&String> = filters.keys().collect();
    assert_eq!(keys, ["status", "author"]);
    assert!(options
        .callbacks
        .unwrap()
        .contains_key(&CallbackPoint::FormFields));
    assert_eq!(options.api, Some(true));
}

#[test]
fn test_type_options_deserialize_camel_case() {
    let yaml = r"
menu: true
displayName: Blog articles
tableFields:
  - title
  - body: { hide: true }
views:
  index: Articles/index
callbacks:
  formFields: article_form_fields
";
    let options: TypeOptions = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(options.menu, Some(true));
    assert_eq!(options.display_name.as_deref(), Some("Blog articles"));
    assert_eq!(options.table_fields.unwrap().len(), 2);
    assert_eq!(
        options.views.unwrap().index.as_deref(),
        Some("Articles/index")
    );
    assert_eq!(
        options.callbacks.unwrap().get(&CallbackPoint::FormFields),
        Some(&"article_form_fields".to_string())
    );
}
