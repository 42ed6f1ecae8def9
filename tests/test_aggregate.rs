use scaffold_kit::ScaffoldError;
use scaffold_kit::aggregate::generate_aggregate;
use scaffold_kit::render::{Values, render};
use scaffold_kit::templates::{Builtin, TemplateSource, ZUSTAND};

fn slices(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn test_generate_aggregate_two_slices() {
    let out = generate_aggregate("Core", &slices(&["auth", "user"])).unwrap();

    let imports: Vec<&str> = out.lines().filter(|l| l.starts_with("import { create")).collect();
    assert_eq!(
        imports,
        vec![
            "import { createAuthSlice } from './slices/auth'",
            "import { createUserSlice } from './slices/user'",
        ]
    );
    assert!(out.contains("export type CoreSlice = AuthSlice & UserSlice"));

    let config_start = out.find("export interface CoreSliceConfig {").unwrap();
    let config_end = config_start + out[config_start..].find('}').unwrap();
    let fields: Vec<&str> = out[config_start..config_end].lines().skip(1).map(str::trim).collect();
    assert_eq!(fields, vec!["auth?: AuthSliceConfig", "user?: UserSliceConfig"]);

    assert!(out.contains("flattenActions<AuthSliceAction & UserSliceAction>([createAuthSlice(...args), createUserSlice(...args)])"));
}

#[test]
fn test_generate_aggregate_empty_fails() {
    assert!(matches!(generate_aggregate("Core", &[]), Err(ScaffoldError::InvalidInput(_))));
}

#[test]
fn test_single_slice_template_matches_generator() {
    let source = Builtin::new(ZUSTAND).unwrap();
    let template = source.read("core/index.ts.tpl").unwrap();
    let values: Values = [
        ("STORE_NAME", "ToolList"),
        ("SLICE_NAME", "Core"),
        ("SLICE_NAME_CAMEL", "core"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let rendered = render(&template, &values).unwrap();
    assert_eq!(rendered, generate_aggregate("ToolList", &slices(&["core"])).unwrap());
}
