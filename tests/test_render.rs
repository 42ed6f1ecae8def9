use proptest::prelude::*;
use scaffold_kit::ScaffoldError;
use scaffold_kit::render::{Values, placeholders, render};

fn values(pairs: &[(&str, &str)]) -> Values {
    pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
}

#[test]
fn test_render_lingui_style_template() {
    let template = "export const SUPPORTED = {{SUPPORTED_LOCALES_ARRAY}};\nexport const DEFAULT = \"{{DEFAULT_LOCALE}}\";\n";
    let out = render(
        template,
        &values(&[("SUPPORTED_LOCALES_ARRAY", "[\"en\", \"zh\"]"), ("DEFAULT_LOCALE", "en")]),
    )
    .unwrap();
    assert_eq!(out, "export const SUPPORTED = [\"en\", \"zh\"];\nexport const DEFAULT = \"en\";\n");
}

#[test]
fn test_render_ignores_lowercase_and_single_braces() {
    let template = "const x = { a: 1 }; {{lower}} {{ SPACED }}";
    assert_eq!(render(template, &Values::new()).unwrap(), template);
}

#[test]
fn test_render_extra_values_are_unused() {
    let out = render("{{A}}", &values(&[("A", "1"), ("UNUSED", "2")])).unwrap();
    assert_eq!(out, "1");
}

#[test]
fn test_placeholders_in_first_use_order() {
    assert_eq!(placeholders("{{B}} {{A}} {{B}}"), vec!["B", "A"]);
}

proptest! {
    #[test]
    fn test_render_without_tokens_is_identity(template in "[a-z {}\n]*") {
        prop_assert_eq!(render(&template, &Values::new()).unwrap(), template);
    }

    #[test]
    fn test_render_substitutes_only_the_token(
        pre in "[a-z ]*",
        post in "[a-z ]*",
        name in "[A-Z][A-Z0-9_]{0,8}",
        value in "[a-zA-Z0-9 {}]*",
        other in "[a-zA-Z0-9 {}]*",
    ) {
        let template = format!("{pre}{{{{{name}}}}}{post}");
        let out = render(&template, &values(&[(&name, &value)])).unwrap();
        prop_assert_eq!(&out, &format!("{pre}{value}{post}"));

        prop_assume!(other != value);
        let changed = render(&template, &values(&[(&name, &other)])).unwrap();
        prop_assert_ne!(&changed, &out);
        prop_assert_eq!(changed, format!("{pre}{other}{post}"));
    }

    #[test]
    fn test_render_names_the_missing_token(
        known in "[A-Z][A-Z0-9_]{0,8}",
        missing in "[A-Z][A-Z0-9_]{0,8}",
    ) {
        prop_assume!(known != missing);
        let template = format!("{{{{{known}}}}} then {{{{{missing}}}}}");
        let err = render(&template, &values(&[(&known, "v")])).unwrap_err();
        match err {
            ScaffoldError::MissingPlaceholder { name } => prop_assert_eq!(name, missing),
            other => prop_assert!(false, "unexpected error: {other}"),
        }
    }
}
