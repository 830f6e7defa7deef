use hieracl::{Access, Acl, Action, ActionSelector, Entity, Error, ROOT, Registry};

fn entity(id: &str) -> Entity {
    Entity::from(id)
}

#[test]
fn fresh_acl_answers_nothing() {
    let acl = Acl::new();
    let rol = entity("rol-1");
    let res = entity("res-1");
    assert!(!acl.is_allowed(&rol, &res, ActionSelector::All).unwrap());
    assert!(!acl.is_denied(&rol, &res, ActionSelector::All).unwrap());
    assert!(acl.export_permissions().is_empty());
    assert!(acl.export_roles().is_empty());
    assert!(acl.export_resources().is_empty());
}

#[test]
fn default_allow_covers_every_pair() {
    let mut acl = Acl::with_default(true);
    acl.add_resource(&entity("res-1"), None).unwrap();
    acl.add_role(&entity("rol-1"), None).unwrap();

    let rol = entity("rol-1");
    let res = entity("res-1");
    for selector in [
        ActionSelector::All,
        Action::Create.into(),
        Action::Read.into(),
        Action::Update.into(),
        Action::Delete.into(),
    ] {
        assert!(acl.is_allowed(&rol, &res, selector).unwrap());
        assert!(!acl.is_denied(&rol, &res, selector).unwrap());
    }
}

#[test]
fn default_deny_covers_every_pair() {
    let mut acl = Acl::with_default(false);
    acl.add_resource(&entity("res-1"), None).unwrap();
    acl.add_role(&entity("rol-1"), None).unwrap();

    let rol = entity("rol-1");
    let res = entity("res-1");
    for selector in [
        ActionSelector::All,
        Action::Create.into(),
        Action::Read.into(),
        Action::Update.into(),
        Action::Delete.into(),
    ] {
        assert!(!acl.is_allowed(&rol, &res, selector).unwrap());
        assert!(acl.is_denied(&rol, &res, selector).unwrap());
    }
}

#[test]
fn most_specific_entry_wins_across_both_hierarchies() {
    let mut acl = Acl::new();
    let rol1 = entity("rol1");
    let rol2 = entity("rol2");
    let rol3 = entity("rol3");
    let res1 = entity("res1");
    let res2 = entity("res2");
    let res3 = entity("res3");

    acl.add_role(&rol1, None).unwrap();
    acl.add_role(&rol2, Some(&rol1)).unwrap();
    acl.add_role(&rol3, Some(&rol2)).unwrap();
    acl.add_resource(&res1, None).unwrap();
    acl.add_resource(&res2, Some(&res1)).unwrap();
    acl.add_resource(&res3, Some(&res2)).unwrap();

    acl.assign(&rol2, &res1, false).unwrap();
    acl.assign(&rol2, &res2, true).unwrap();
    acl.assign(&rol3, &res3, false).unwrap();

    assert!(!acl.is_allowed(&rol3, &res3, ActionSelector::All).unwrap());
    assert!(acl.is_allowed(&rol3, &res2, ActionSelector::All).unwrap());
    assert!(!acl.is_allowed(&rol3, &res1, ActionSelector::All).unwrap());
    assert!(acl.is_denied(&rol3, &res1, ActionSelector::All).unwrap());
}

#[test]
fn removing_one_action_leaves_the_rest_intact() {
    let mut acl = Acl::new();
    let rol = entity("role-1");
    let res = entity("resource-1");
    acl.assign(&rol, &res, Access::allow_all()).unwrap();
    assert!(acl.is_allowed(&rol, &res, ActionSelector::All).unwrap());

    let mut chart = acl.export_permissions();
    chart
        .remove("role-1", "resource-1", &[ActionSelector::One(Action::Delete)])
        .unwrap();
    // Delete is now indeterminate, so "all" no longer holds.
    assert_eq!(
        chart.is_allowed("role-1", "resource-1", ActionSelector::All),
        Some(false)
    );
    assert_eq!(
        chart.is_allowed("role-1", "resource-1", Action::Create.into()),
        Some(true)
    );
}

#[test]
fn cascading_role_removal_drops_descendants_and_their_permissions() {
    let mut acl = Acl::new();
    let parent = entity("staff");
    let child = entity("intern");
    acl.add_role(&parent, None).unwrap();
    acl.add_role(&child, Some(&parent)).unwrap();
    acl.assign(&parent, &entity("wiki"), true).unwrap();
    acl.assign(&child, &entity("wiki"), false).unwrap();

    acl.remove_role(&parent, true).unwrap();
    assert!(!acl.has_role(&parent));
    assert!(!acl.has_role(&child));
    let chart = acl.export_permissions();
    assert!(!chart.has_pair("staff", "wiki"));
    assert!(!chart.has_pair("intern", "wiki"));
}

#[test]
fn non_cascading_removal_reparents_children() {
    let mut acl = Acl::new();
    let top = entity("top");
    let mid = entity("mid");
    let leaf = entity("leaf");
    acl.add_role(&top, None).unwrap();
    acl.add_role(&mid, Some(&top)).unwrap();
    acl.add_role(&leaf, Some(&mid)).unwrap();

    acl.remove_role(&mid, false).unwrap();
    assert!(acl.has_role(&leaf));
    assert_eq!(
        acl.export_roles().traverse_to_root("leaf"),
        vec!["leaf", "top", "*"]
    );
}

#[test]
fn resource_removal_unlocks_inherited_decisions() {
    let mut acl = Acl::with_default(true);
    let rol = entity("rol-1");
    let res = entity("res-1");
    acl.assign(&rol, &res, false).unwrap();
    assert!(acl.is_denied(&rol, &res, ActionSelector::All).unwrap());

    acl.remove_resource(&res, false).unwrap();
    assert!(!acl.has_resource(&res));
    // The explicit deny is gone; the default allow applies again.
    assert!(acl.is_allowed(&rol, &res, ActionSelector::All).unwrap());
}

#[test]
fn registry_export_round_trips_through_json() {
    let mut acl = Acl::new();
    acl.add_role(&entity("rol1"), None).unwrap();
    acl.add_role(&entity("rol2"), Some(&entity("rol1"))).unwrap();

    let roles = acl.export_roles();
    let json = roles.save_to_json().unwrap();
    let loaded = Registry::load_from_json(&json).unwrap();
    assert_eq!(loaded, roles);
    assert_eq!(loaded.traverse_to_root("rol2"), vec!["rol2", "rol1", "*"]);
}

#[test]
fn allowed_and_denied_are_not_complements() {
    let mut acl = Acl::new();
    let rol = entity("rol-1");
    let res = entity("res-1");
    acl.assign(&rol, &res, Access::new().with(Action::Read, true))
        .unwrap();

    // No statement about create: neither allowed nor denied.
    assert!(!acl.is_allowed(&rol, &res, Action::Create.into()).unwrap());
    assert!(!acl.is_denied(&rol, &res, Action::Create.into()).unwrap());
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut acl = Acl::new();
    acl.add_role(&entity("rol-1"), None).unwrap();
    let err = acl.add_role(&entity("rol-1"), None).expect_err("must reject");
    assert!(matches!(err, Error::Duplicate(_)));
}

#[test]
fn root_is_never_a_valid_entity_id() {
    let mut acl = Acl::new();
    let err = acl.add_role(&entity(ROOT), None).expect_err("must reject");
    assert!(matches!(err, Error::InvalidType(_)));
}
