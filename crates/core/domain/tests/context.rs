use domain::{AdminContext, ReportStatus};

#[test]
fn admin_context_builds() {
    let ctx = AdminContext::new("admin-1", "alice", "superadmin");

    assert_eq!(ctx.admin_id, "admin-1");
    assert_eq!(ctx.username, "alice");
    assert_eq!(ctx.role, "superadmin");
}

#[test]
fn report_status_round_trips() {
    assert_eq!(ReportStatus::default(), ReportStatus::New);
    assert_eq!(ReportStatus::parse("confirmed"), Some(ReportStatus::Confirmed));
    assert_eq!(ReportStatus::parse("unknown"), None);
    assert_eq!(ReportStatus::Resolved.as_str(), "resolved");
}

#[test]
fn report_status_serializes_lowercase() {
    let json = serde_json::to_string(&ReportStatus::Confirmed).expect("serialize");
    assert_eq!(json, "\"confirmed\"");
}
