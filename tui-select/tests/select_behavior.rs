use serde_json::{json, Value};
use tui_select::prelude::*;
use tui_select::Displayed;
use tui_select_core::testing::{click, key_event, RenderHarness, TestHarness};
use tui_select_core::{assert_emitted, assert_not_emitted, count_emitted};

#[derive(Debug, Clone, PartialEq)]
enum FormAction {
    Opened,
    Closed,
    Changed(ChangeEvent),
    Searched(String),
}

impl Action for FormAction {
    fn name(&self) -> &'static str {
        match self {
            FormAction::Opened => "Opened",
            FormAction::Closed => "Closed",
            FormAction::Changed(_) => "Changed",
            FormAction::Searched(_) => "Searched",
        }
    }
}

#[derive(Default)]
struct Form {
    options: Vec<Item>,
    value: Option<SelectValue>,
    selected: Option<Selected>,
    config: SelectConfig,
}

impl Form {
    fn with_options(options: &[&str]) -> Self {
        Self {
            options: options.iter().map(|&o| Item::from(o)).collect(),
            ..Default::default()
        }
    }

    fn props(&self) -> SelectProps<'_, FormAction> {
        SelectProps::new(&self.options, &self.config)
            .with_value(self.value.as_ref())
            .with_selected(self.selected.as_ref())
            .focused(true)
            .on_open(|| FormAction::Opened)
            .on_close(|| FormAction::Closed)
            .on_change(FormAction::Changed)
    }
}

fn display(props: SelectProps<'_, FormAction>) -> Displayed {
    Select::default().display(&props)
}

fn text(props: SelectProps<'_, FormAction>) -> String {
    display(props).to_line().to_string()
}

fn upper_name(value: &Value) -> String {
    value["name"].as_str().unwrap_or_default().to_uppercase()
}

// Display resolution

#[test]
fn value_label_overrides_everything() {
    let mut form = Form::with_options(&["a", "b", "c"]);
    form.value = Some(SelectValue::from("a"));
    form.selected = Some(Selected::Indices(vec![0, 2]));
    let label = Line::from("Custom");

    assert_eq!(
        display(form.props().with_value_label(&label)),
        Displayed::Label(label.clone())
    );
}

#[test]
fn several_plain_values_show_multiple_message() {
    let mut form = Form::with_options(&["a", "b"]);
    form.value = Some(SelectValue::Many(vec!["a".into(), "b".into()]));
    assert_eq!(text(form.props()), "multiple");

    form.config = SelectConfig::default().with_multiple_message("2 chosen");
    assert_eq!(text(form.props()), "2 chosen");
}

#[test]
fn json_array_value_shows_like_a_list() {
    let mut form = Form::default();

    form.value = Some(SelectValue::from(json!(["a", "b"])));
    assert_eq!(text(form.props()), "multiple");

    form.value = Some(SelectValue::from(json!(["x"])));
    assert_eq!(text(form.props()), "x");

    form.value = Some(SelectValue::from(json!([])));
    assert!(display(form.props()).is_empty());
}

#[test]
fn several_element_values_render_as_elements() {
    let mut form = Form::default();
    let red = Line::styled("red", Style::default().fg(Color::Red));
    let blue = Line::styled("blue", Style::default().fg(Color::Blue));
    form.value = Some(SelectValue::Many(vec![
        Item::element(red.clone()),
        Item::element(blue.clone()),
    ]));

    assert_eq!(display(form.props()), Displayed::Elements(vec![red, blue]));
    assert_eq!(text(form.props()), "red, blue");
}

#[test]
fn single_object_in_list_uses_label_key() {
    let mut form = Form::default();
    form.value = Some(SelectValue::Many(vec![Item::data(json!({"name": "x"}))]));
    let label_key = LabelKey::from("name");

    assert_eq!(text(form.props().with_label_key(&label_key)), "x");
}

#[test]
fn object_value_uses_accessor() {
    let mut form = Form::default();
    form.value = Some(SelectValue::from(json!({"name": "y"})));
    let label_key = LabelKey::Accessor(upper_name);

    assert_eq!(text(form.props().with_label_key(&label_key)), "Y");
}

#[test]
fn object_value_with_label_key_beats_selected() {
    let mut form = Form::with_options(&["a", "b"]);
    form.value = Some(SelectValue::from(json!({"name": "z"})));
    form.selected = Some(Selected::Index(0));
    let label_key = LabelKey::from("name");

    assert_eq!(text(form.props().with_label_key(&label_key)), "z");
}

#[test]
fn missing_label_field_shows_empty() {
    let mut form = Form::default();
    form.value = Some(SelectValue::from(json!({"title": "t"})));
    let label_key = LabelKey::from("name");

    assert!(display(form.props().with_label_key(&label_key)).is_empty());
}

#[test]
fn selected_indices_resolve_against_options() {
    let mut form = Form::with_options(&["a", "b", "c"]);

    form.selected = Some(Selected::Indices(vec![0, 2]));
    assert_eq!(text(form.props()), "multiple");

    form.selected = Some(Selected::Index(1));
    assert_eq!(text(form.props()), "b");

    form.selected = Some(Selected::Indices(vec![2]));
    assert_eq!(text(form.props()), "c");

    form.selected = Some(Selected::Indices(vec![]));
    assert_eq!(text(form.props()), "");
}

#[test]
fn out_of_range_selected_is_empty() {
    let mut form = Form::with_options(&["a"]);
    form.selected = Some(Selected::Index(5));
    assert!(display(form.props()).is_empty());
}

#[test]
fn scalar_value_loses_to_selected() {
    let mut form = Form::with_options(&["a", "b"]);
    form.value = Some(SelectValue::from("a"));
    form.selected = Some(Selected::Index(1));
    assert_eq!(text(form.props()), "b");

    form.selected = None;
    assert_eq!(text(form.props()), "a");
}

#[test]
fn nothing_selected_shows_placeholder() {
    let mut form = Form::with_options(&["a"]);
    form.config = SelectConfig::default().with_placeholder("Pick one");
    let mut select = Select::default();
    let mut render = RenderHarness::new(20, 3);

    let output =
        render.render_to_string_plain(|frame| select.render(frame, frame.area(), form.props()));
    assert!(output.contains("Pick one"));
}

// Open / close / change

#[test]
fn open_emits_once_after_state_is_open() {
    let form = Form::with_options(&["a", "b"]);
    let mut select = Select::default();
    let mut harness = TestHarness::<(), FormAction>::default();

    harness.emit_all(select.handle_event(&key_event("down"), form.props()));
    assert!(select.is_open());

    // already open: navigation, not another open
    harness.emit_all(select.handle_event(&key_event("down"), form.props()));

    let emitted = harness.drain_emitted();
    assert_eq!(count_emitted!(emitted, FormAction::Opened), 1);
    assert_eq!(emitted.len(), 1);
}

#[test]
fn choosing_closes_then_changes() {
    let form = Form::with_options(&["small", "medium", "large"]);
    let mut select = Select::default();

    select.open(form.props());
    let _: Vec<_> = select
        .handle_event(&key_event("down"), form.props())
        .into_iter()
        .collect();
    let actions: Vec<_> = select
        .handle_event(&key_event("enter"), form.props())
        .into_iter()
        .collect();

    assert!(!select.is_open());
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0], FormAction::Closed);
    let FormAction::Changed(change) = &actions[1] else {
        panic!("expected a change, got {:?}", actions[1]);
    };
    assert_eq!(change.option, Item::from("medium"));
    assert_eq!(change.index, 1);
    assert_eq!(change.value, SelectValue::from("medium"));
    assert_eq!(change.selected, Selected::Index(1));
    assert!(change.target.is_some());
}

#[test]
fn keep_open_still_changes() {
    let mut form = Form::with_options(&["small", "large"]);
    form.config = SelectConfig::default().with_close_on_change(false);
    let mut select = Select::default();

    select.open(form.props());
    let actions: Vec<_> = select
        .handle_event(&key_event("space"), form.props())
        .into_iter()
        .collect();

    assert!(select.is_open());
    assert_not_emitted!(actions, FormAction::Closed);
    assert_emitted!(actions, FormAction::Changed(ChangeEvent { index: 0, .. }));
}

#[test]
fn disabled_never_opens() {
    let mut form = Form::with_options(&["a"]);
    form.config = SelectConfig::default().with_disabled(true);
    let mut select = Select::default();
    let mut render = RenderHarness::new(20, 6);

    render.render(|frame| select.render(frame, frame.area(), form.props()));

    for event in [key_event("down"), key_event("up"), click(2, 1)] {
        let actions: Vec<_> = select.handle_event(&event, form.props()).into_iter().collect();
        assert!(actions.is_empty());
    }
    assert!(!select.is_open());
}

#[test]
fn disabling_while_open_closes_on_next_key() {
    let mut form = Form::with_options(&["a", "b"]);
    let mut select = Select::default();
    let mut render = RenderHarness::new(20, 8);

    select.open(form.props());
    render.render(|frame| select.render(frame, frame.area(), form.props()));

    form.config = SelectConfig::default().with_disabled(true);
    let output =
        render.render_to_string_plain(|frame| select.render(frame, frame.area(), form.props()));
    assert!(!output.contains("  a"));

    let actions: Vec<_> = select
        .handle_event(&key_event("esc"), form.props())
        .into_iter()
        .collect();
    assert_eq!(actions, vec![FormAction::Closed]);
    assert!(!select.is_open());

    let output =
        render.render_to_string_plain(|frame| select.render(frame, frame.area(), form.props()));
    assert_eq!(output.lines().filter(|line| !line.is_empty()).count(), 3);
}

fn shirts() -> Vec<Item> {
    vec![
        Item::data(json!({"name": "Small", "sku": "S"})),
        Item::data(json!({"name": "Medium", "sku": "M", "sold_out": true})),
        Item::data(json!({"name": "Large", "sku": "L"})),
    ]
}

#[test]
fn sold_out_option_is_skipped_and_value_is_projected() {
    let form = Form {
        options: shirts(),
        config: SelectConfig::default()
            .with_disabled_key("sold_out")
            .with_value_key("sku"),
        ..Default::default()
    };
    let label_key = LabelKey::from("name");
    let props = || form.props().with_label_key(&label_key);
    let mut select = Select::default();

    select.open(props());
    let mut harness = TestHarness::<(), FormAction>::default();
    for event in [key_event("down"), key_event("enter")] {
        harness.emit_all(select.handle_event(&event, props()));
    }

    let emitted = harness.drain_emitted();
    let [FormAction::Closed, FormAction::Changed(change)] = emitted.as_slice() else {
        panic!("unexpected actions: {emitted:?}");
    };
    assert_eq!(change.index, 2);
    assert_eq!(change.value, SelectValue::from(json!("L")));
    assert_eq!(change.option, shirts()[2]);
}

#[test]
fn projected_value_marks_option_in_drop() {
    let form = Form {
        options: shirts(),
        value: Some(SelectValue::from(json!("L"))),
        config: SelectConfig::default().with_value_key("sku"),
        ..Default::default()
    };
    let label_key = LabelKey::from("name");
    let mut select = Select::default();
    let mut render = RenderHarness::new(20, 8);

    select.open(form.props().with_label_key(&label_key));
    let output = render.render_to_string_plain(|frame| {
        select.render(frame, frame.area(), form.props().with_label_key(&label_key))
    });
    assert!(output.contains("✓ Large"));
    assert!(output.contains("  Small"));
}

#[test]
fn search_query_goes_to_host_which_filters() {
    let mut form = Form::with_options(&["small", "medium", "large"]);
    form.config = SelectConfig::default().with_search_placeholder("Search sizes");
    let all = form.options.clone();
    let mut select = Select::default();
    let mut render = RenderHarness::new(24, 10);

    select.open(form.props().on_search(FormAction::Searched));
    let mut query = String::new();
    for event in [key_event("l"), key_event("a")] {
        for action in select.handle_event(&event, form.props().on_search(FormAction::Searched)) {
            if let FormAction::Searched(q) = action {
                query = q;
            }
        }
    }
    assert_eq!(query, "la");

    form.options = all
        .iter()
        .filter(|option| option.label(None).to_string().contains(&query))
        .cloned()
        .collect();
    let output = render.render_to_string_plain(|frame| {
        select.render(frame, frame.area(), form.props().on_search(FormAction::Searched))
    });
    assert!(output.contains("la"));
    assert!(output.contains("large"));
    assert!(!output.contains("small"));

    form.options.clear();
    let output = render.render_to_string_plain(|frame| {
        select.render(frame, frame.area(), form.props().on_search(FormAction::Searched))
    });
    assert!(output.contains("No matches found"));
}

#[test]
fn multiple_mode_toggles_value() {
    let mut form = Form::with_options(&["a", "b", "c"]);
    form.config = SelectConfig::default()
        .with_multiple(true)
        .with_close_on_change(false);
    form.value = Some(SelectValue::Many(vec!["a".into()]));
    let mut select = Select::default();

    select.open(form.props());
    // cursor starts on "a"; move to "c" and choose
    for k in ["down", "down"] {
        let _: Vec<_> = select.handle_event(&key_event(k), form.props()).into_iter().collect();
    }
    let actions: Vec<_> = select
        .handle_event(&key_event("enter"), form.props())
        .into_iter()
        .collect();

    let [FormAction::Changed(change)] = actions.as_slice() else {
        panic!("unexpected actions: {actions:?}");
    };
    assert_eq!(change.value, SelectValue::Many(vec!["a".into(), "c".into()]));
    assert_eq!(change.selected, Selected::Indices(vec![0, 2]));

    // host applies the change, trigger now shows the multiple message
    form.value = Some(change.value.clone());
    assert_eq!(text(form.props()), "multiple");
}

#[test]
fn drop_opens_above_when_aligned_to_top() {
    let mut form = Form::with_options(&["a", "b"]);
    form.config = SelectConfig::default().with_drop_align(DropAlign::above());
    let mut select = Select::default();
    let mut render = RenderHarness::new(20, 10);

    select.open(form.props());
    let output = render.render_to_string_plain(|frame| {
        let area = Rect::new(0, 6, 20, 3);
        select.render(frame, area, form.props());
    });

    let lines: Vec<&str> = output.lines().collect();
    // drop is 4 rows, ending right above the trigger at row 6
    assert!(lines[3].contains("  a"));
    assert!(lines[4].contains("  b"));
}

#[test]
fn drop_target_anchors_drop() {
    let form = Form::with_options(&["a", "b"]);
    let mut select = Select::default();
    let mut render = RenderHarness::new(40, 12);

    select.open(form.props());
    let output = render.render_to_string_plain(|frame| {
        select.render(
            frame,
            Rect::new(0, 0, 10, 3),
            form.props().with_drop_target(Rect::new(20, 5, 15, 1)),
        );
    });

    let lines: Vec<&str> = output.lines().collect();
    assert!(lines[7].starts_with(&format!("{}│  a", " ".repeat(20))));
}
