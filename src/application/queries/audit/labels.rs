/// Human-readable description of an audited action.
pub fn action_label(action: &str, resource_type: &str, resource_id: Option<&str>) -> String {
    let id = resource_id.filter(|id| !id.is_empty());
    let with_id = |text: &str| match id {
        Some(id) => format!("{text} #{id}"),
        None => text.to_owned(),
    };

    match action {
        "auth.login" => "Logged in to the system".to_owned(),
        "auth.logout" => "Logged out of the system".to_owned(),
        "auth.register" => "Registered a new account".to_owned(),
        "ticket.create" => with_id("Created ticket"),
        "ticket.update" => with_id("Updated ticket"),
        "ticket.close" => with_id("Closed ticket"),
        "ticket.delete" => with_id("Deleted ticket"),
        _ => with_id(&format!("{action} — {resource_type}")),
    }
}
