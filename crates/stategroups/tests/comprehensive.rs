//! Comprehensive tests for stategroups
//!
//! Whole-page scenarios: scan, busy/idle propagation, triggers, inheritance
//! and deferred group resolution.

use stategroups::attrs;
use stategroups::dom::NodeId;
use stategroups::{ElementConfig, EngineConfig, StateGroupsService, StatePage};

fn page(html: &str) -> StatePage {
    let mut page = StatePage::from_html(html, EngineConfig::seeded(7)).unwrap();
    page.setup_elements().unwrap();
    page
}

fn node(page: &StatePage, id: &str) -> NodeId {
    page.document().get_element_by_id(id).unwrap()
}

fn uid(page: &StatePage, id: &str) -> String {
    let node = node(page, id);
    page.engine().node(node).unwrap().uid.as_str().to_string()
}

fn count(page: &StatePage, id: &str) -> u32 {
    page.engine().ref_count(&uid(page, id)).unwrap()
}

fn attr<'a>(page: &'a StatePage, id: &str, name: &str) -> Option<&'a str> {
    page.document().tree().get_attribute(node(page, id), name)
}

fn has_class(page: &StatePage, id: &str, class: &str) -> bool {
    page.document().tree().has_class(node(page, id), class)
}

const LOADING_GROUP: &str = r#"
    <div id="g" data-state-options='{"role":"group","groupId":"g1"}'>
        <span id="e" data-state-options='{"busyCssClasses":["loading"]}'></span>
    </div>
"#;

#[test]
fn test_setup_writes_identity_attributes() {
    let page = page(LOADING_GROUP);

    assert_eq!(attr(&page, "g", attrs::READY), Some("true"));
    assert_eq!(attr(&page, "g", attrs::ROLE), Some("group"));
    assert_eq!(attr(&page, "g", attrs::GROUP_ID), Some("g1"));
    assert_eq!(attr(&page, "g", attrs::GROUP_STATUS), Some("false"));

    assert_eq!(attr(&page, "e", attrs::ROLE), Some("element"));
    assert_eq!(attr(&page, "e", attrs::GROUP_ID), Some("g1"));
    assert_eq!(attr(&page, "e", attrs::UID).map(str::len), Some(30));
    assert_ne!(uid(&page, "g"), uid(&page, "e"));
}

#[test]
fn test_busy_idle_reference_counting() {
    let mut page = page(LOADING_GROUP);

    page.set_busy("g1", None).unwrap();
    assert!(has_class(&page, "e", "loading"));
    assert_eq!(attr(&page, "g", attrs::GROUP_STATUS), Some("true"));
    assert_eq!(count(&page, "e"), 1);

    page.set_busy("g1", None).unwrap();
    assert_eq!(count(&page, "e"), 2);
    assert_eq!(count(&page, "g"), 2);

    page.set_idle("g1").unwrap();
    assert!(has_class(&page, "e", "loading"));
    assert_eq!(attr(&page, "g", attrs::GROUP_STATUS), Some("true"));

    page.set_idle("g1").unwrap();
    assert!(!has_class(&page, "e", "loading"));
    assert_eq!(attr(&page, "g", attrs::GROUP_STATUS), Some("false"));
    assert_eq!(count(&page, "e"), 0);

    // Extra idle signals are clamped
    page.set_idle("g1").unwrap();
    assert_eq!(count(&page, "e"), 0);
    assert_eq!(count(&page, "g"), 0);
}

#[test]
fn test_broadcast_group_with_two_anchors() {
    let mut page = page(
        r#"
        <div id="a1" data-state-options='{"role":"group","groupId":"shared"}'>
            <span id="x1" data-state-options='{"busyCssClasses":["loading"]}'></span>
        </div>
        <div id="a2" data-state-options='{"role":"group","groupId":"shared"}'>
            <span id="x2" data-state-options='{"busyCssClasses":["loading"]}'></span>
        </div>
    "#,
    );

    page.set_busy("shared", None).unwrap();
    assert_eq!(attr(&page, "a1", attrs::GROUP_STATUS), Some("true"));
    assert_eq!(attr(&page, "a2", attrs::GROUP_STATUS), Some("true"));
    assert!(has_class(&page, "x1", "loading"));
    assert!(has_class(&page, "x2", "loading"));
    assert_eq!(count(&page, "x1"), 1);
    assert_eq!(count(&page, "x2"), 1);

    page.set_idle("shared").unwrap();
    assert_eq!(attr(&page, "a1", attrs::GROUP_STATUS), Some("false"));
    assert_eq!(attr(&page, "a2", attrs::GROUP_STATUS), Some("false"));
    assert!(!has_class(&page, "x2", "loading"));
}

const EXCLUSIVE: &str = r#"
    <form id="g" data-state-options='{"role":"group","groupId":"form"}'>
        <button id="t" data-state-options='{"runTriggerOnEvents":["click"],"id":"T"}'><i id="icon"></i></button>
        <button id="u" data-state-options='{"runTriggerOnEvents":["click"],"id":"U"}'></button>
        <span id="spinner" data-state-options='{"exclusiveToTriggerIds":["T"],"busyCssClasses":["loading"]}'></span>
        <span id="any" data-state-options='{"busyCssClasses":["loading"]}'></span>
    </form>
"#;

#[test]
fn test_exclusive_element_ignores_other_senders() {
    let mut page = page(EXCLUSIVE);

    let u = node(&page, "u");
    assert_eq!(page.dispatch_event(u, "click").unwrap(), 1);
    assert!(!has_class(&page, "spinner", "loading"));
    assert_eq!(count(&page, "spinner"), 0);
    assert!(has_class(&page, "any", "loading"));
    assert_eq!(attr(&page, "g", attrs::GROUP_STATUS), Some("true"));
}

#[test]
fn test_exclusive_element_ignores_programmatic_busy() {
    let mut page = page(EXCLUSIVE);

    page.set_busy("form", None).unwrap();
    assert!(!has_class(&page, "spinner", "loading"));
    assert!(has_class(&page, "any", "loading"));
}

#[test]
fn test_exclusive_element_follows_its_trigger() {
    let mut page = page(EXCLUSIVE);

    let t = node(&page, "t");
    page.dispatch_event(t, "click").unwrap();
    assert!(has_class(&page, "spinner", "loading"));
    assert_eq!(count(&page, "spinner"), 1);

    // Idle signals are not filtered
    page.set_idle("form").unwrap();
    assert!(!has_class(&page, "spinner", "loading"));
}

#[test]
fn test_programmatic_busy_with_sender() {
    let mut page = page(EXCLUSIVE);

    let t = node(&page, "t");
    page.set_busy("form", Some(t)).unwrap();
    assert!(has_class(&page, "spinner", "loading"));
}

#[test]
fn test_trigger_event_bubbles_from_descendant() {
    let mut page = page(EXCLUSIVE);

    let icon = node(&page, "icon");
    assert_eq!(page.dispatch_event(icon, "click").unwrap(), 1);
    assert!(has_class(&page, "spinner", "loading"));
}

#[test]
fn test_unlistened_event_is_ignored() {
    let mut page = page(EXCLUSIVE);

    let t = node(&page, "t");
    assert_eq!(page.dispatch_event(t, "change").unwrap(), 0);
    assert_eq!(attr(&page, "g", attrs::GROUP_STATUS), Some("false"));
}

#[test]
fn test_inherit_from_explicit_parent() {
    let mut page = page(
        r#"
        <div id="p" data-state-options='{"role":"group","groupId":"p"}'></div>
        <div id="c" data-state-options='{"role":"group","groupId":"c","inheritGroupStateFromParent":true,"parentGroupId":"p"}'>
            <span id="e" data-state-options='{"busyCssClasses":["loading"]}'></span>
        </div>
    "#,
    );
    assert_eq!(attr(&page, "c", attrs::PARENT_GROUP_ID), Some("p"));

    page.set_busy("p", None).unwrap();
    assert_eq!(attr(&page, "c", attrs::GROUP_STATUS), Some("true"));
    assert!(has_class(&page, "e", "loading"));

    page.set_idle("p").unwrap();
    assert_eq!(attr(&page, "c", attrs::GROUP_STATUS), Some("false"));
    assert!(!has_class(&page, "e", "loading"));
}

#[test]
fn test_inherit_from_enclosing_group() {
    let mut page = page(
        r#"
        <div id="o" data-state-options='{"role":"group","groupId":"outer"}'>
            <div id="i" data-state-options='{"role":"group","groupId":"inner","inheritGroupStateFromParent":true}'>
                <span id="e" data-state-options='{"busyCssClasses":["loading"]}'></span>
            </div>
            <div id="n" data-state-options='{"role":"group","groupId":"plain"}'></div>
        </div>
    "#,
    );

    page.set_busy("outer", None).unwrap();
    assert_eq!(attr(&page, "i", attrs::GROUP_STATUS), Some("true"));
    assert!(has_class(&page, "e", "loading"));
    assert_eq!(attr(&page, "n", attrs::GROUP_STATUS), Some("false"));
}

#[test]
fn test_new_inheriting_group_mirrors_busy_parent() {
    let mut page = page(r#"<div id="o" data-state-options='{"role":"group","groupId":"outer"}'></div>"#);
    page.set_busy("outer", None).unwrap();

    let outer = node(&page, "o");
    let options = ElementConfig::builder()
        .is_group_root()
        .use_group_id("late")
        .inherit_group_state()
        .compile();
    let tree = page.document_mut().tree_mut();
    let inner = tree.create_element("div");
    tree.set_attribute(inner, "id", "i").unwrap();
    tree.set_attribute(inner, attrs::OPTIONS, &options).unwrap();
    tree.append_child(outer, inner).unwrap();

    let report = page.setup_elements_in(inner).unwrap();
    assert_eq!(report.initialized, vec![inner]);
    assert_eq!(attr(&page, "i", attrs::GROUP_STATUS), Some("true"));
}

#[test]
fn test_waiting_element_resolves_when_group_registers() {
    let mut page = page(
        r#"<span id="e" data-state-options='{"groupId":"late","busyCssClasses":["loading"]}'></span>"#,
    );
    let e = node(&page, "e");
    assert_eq!(attr(&page, "e", attrs::READY), Some("waitingforgroup"));
    assert_eq!(page.engine().waiting_elements(), vec![(e, "late")]);

    let body = page.document().body();
    let tree = page.document_mut().tree_mut();
    let group = tree.create_element("section");
    tree.set_attribute(group, attrs::OPTIONS, r#"{"role":"group","groupId":"late"}"#)
        .unwrap();
    tree.append_child(body, group).unwrap();
    page.setup_elements_in(group).unwrap();

    assert_eq!(attr(&page, "e", attrs::READY), Some("true"));
    assert!(page.engine().waiting_elements().is_empty());

    page.set_busy("late", None).unwrap();
    assert!(has_class(&page, "e", "loading"));
}

#[test]
fn test_waiting_element_reflects_busy_group_on_release() {
    let mut page = page(
        r#"
        <div id="o" data-state-options='{"role":"group","groupId":"outer"}'></div>
        <span id="e" data-state-options='{"groupId":"late","busyCssClasses":["loading"]}'></span>
    "#,
    );
    page.set_busy("outer", None).unwrap();
    assert!(!has_class(&page, "e", "loading"));

    let outer = node(&page, "o");
    let tree = page.document_mut().tree_mut();
    let group = tree.create_element("div");
    tree.set_attribute(
        group,
        attrs::OPTIONS,
        r#"{"role":"group","groupId":"late","inheritGroupStateFromParent":true}"#,
    )
    .unwrap();
    tree.append_child(outer, group).unwrap();
    page.setup_elements_in(group).unwrap();

    assert!(has_class(&page, "e", "loading"));
    assert_eq!(count(&page, "e"), 1);
}

#[test]
fn test_explicit_group_later_in_document_resolves_immediately() {
    let page = page(
        r#"
        <span id="e" data-state-options='{"groupId":"later"}'></span>
        <div id="g" data-state-options='{"role":"group","groupId":"later"}'></div>
    "#,
    );
    assert_eq!(attr(&page, "e", attrs::READY), Some("true"));
    assert_eq!(attr(&page, "g", attrs::READY), Some("true"));
    assert!(page.engine().waiting_elements().is_empty());
}

#[test]
fn test_sweep_after_removal_and_fresh_uid_on_readd() {
    let mut page = page(LOADING_GROUP);
    page.set_busy("g1", None).unwrap();
    let old_uid = uid(&page, "e");
    let e = node(&page, "e");
    let g = node(&page, "g");

    page.remove(e);
    assert_eq!(page.sweep(), 1);
    assert!(page.engine().node(e).is_none());
    assert!(page.engine().ref_count(&old_uid).is_none());

    page.document_mut().tree_mut().append_child(g, e).unwrap();
    page.setup_elements_in(g).unwrap();

    let new_uid = uid(&page, "e");
    assert_ne!(new_uid, old_uid);
    assert_eq!(count(&page, "e"), 1);
    assert!(has_class(&page, "e", "loading"));
}

#[test]
fn test_generated_group_id_shared_with_members() {
    let page = page(
        r#"
        <div id="g" data-state-options='{"role":"group"}'>
            <span id="e" data-state-options='{}'></span>
        </div>
    "#,
    );
    let group_id = attr(&page, "g", attrs::GROUP_ID).unwrap();
    assert_eq!(group_id.len(), 30);
    assert_eq!(attr(&page, "e", attrs::GROUP_ID), Some(group_id));
}

#[test]
fn test_idle_presentation_applied_on_setup() {
    let options = ElementConfig::builder().show_when_busy().disable_when_busy(true).compile();
    let html = format!(
        r#"<div data-state-options='{{"role":"group","groupId":"g"}}'><button id="b" data-state-options='{options}'></button></div>"#
    );
    let mut page = page(&html);
    assert!(has_class(&page, "b", "stateindicator-hidden"));
    assert_eq!(attr(&page, "b", "disabled"), None);

    page.set_busy("g", None).unwrap();
    assert!(!has_class(&page, "b", "stateindicator-hidden"));
    assert!(has_class(&page, "b", "disabled"));
    assert_eq!(attr(&page, "b", "disabled"), Some("disabled"));

    page.set_idle("g").unwrap();
    assert!(has_class(&page, "b", "stateindicator-hidden"));
    assert!(!has_class(&page, "b", "stateindicator-disabled"));
    assert_eq!(attr(&page, "b", "disabled"), None);
}
