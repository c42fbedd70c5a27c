//! Behaviour-driven tests for dependency manifest parsing.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::{ParseError, ParsedDependency, SourceInput, parse_pep621_dependencies, parse_requirements};

#[derive(Default)]
struct TestWorld {
    content: Option<String>,
    result: Option<Result<Vec<ParsedDependency>, ParseError>>,
}

#[fixture]
fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}

fn strip_quotes(value: &str) -> &str {
    value.trim_matches('"')
}

#[given("the requirements content {content}")]
fn given_requirements_content(world: &RefCell<TestWorld>, content: String) {
    world.borrow_mut().content = Some(strip_quotes(&content).to_owned());
}

#[given("a PEP 621 manifest declaring {entry}")]
fn given_pep621_manifest(world: &RefCell<TestWorld>, entry: String) {
    let manifest = format!(
        "[project]\nname = \"demo\"\ndependencies = [\"{}\"]\n",
        strip_quotes(&entry)
    );
    world.borrow_mut().content = Some(manifest);
}

#[when("the manifest is parsed as requirements")]
fn when_parsed_as_requirements(world: &RefCell<TestWorld>) {
    let mut state = world.borrow_mut();
    let content = state.content.clone().expect("content should be configured");
    state.result = Some(parse_requirements(&SourceInput::from_content(content)));
}

#[when("the manifest is parsed as PEP 621 metadata")]
fn when_parsed_as_pep621(world: &RefCell<TestWorld>) {
    let mut state = world.borrow_mut();
    let content = state.content.clone().expect("content should be configured");
    state.result = Some(parse_pep621_dependencies(&SourceInput::from_content(content)));
}

#[then("parsing succeeds with {count} dependency")]
fn then_parsing_succeeds(world: &RefCell<TestWorld>, count: usize) {
    let state = world.borrow();
    let parsed = state
        .result
        .as_ref()
        .expect("result missing")
        .as_ref()
        .expect("parsing should succeed");
    assert_eq!(parsed.len(), count);
}

#[then("the first dependency is named {name}")]
fn then_first_dependency_named(world: &RefCell<TestWorld>, name: String) {
    let state = world.borrow();
    let parsed = state
        .result
        .as_ref()
        .expect("result missing")
        .as_ref()
        .expect("parsing should succeed");
    let first = parsed.first().expect("at least one dependency");
    assert_eq!(first.name, strip_quotes(&name));
}

#[then("parsing fails")]
fn then_parsing_fails(world: &RefCell<TestWorld>) {
    let state = world.borrow();
    let result = state.result.as_ref().expect("result missing");
    assert!(result.is_err(), "parsing should fail");
}

#[scenario(path = "tests/features/manifest_parsing.feature")]
fn manifest_parsing_behaviour(world: RefCell<TestWorld>) {
    let _ = world;
}
