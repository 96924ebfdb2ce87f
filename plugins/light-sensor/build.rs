const COMMANDS: &[&str] = &[
    "is_available",
    "start",
    "stop",
    "check_permissions",
    "request_permissions",
    "get_plugin_version",
    "add_listener",
    "remove_listener",
    "remove_all_listeners",
];

fn main() {
    tauri_plugin::Builder::new(COMMANDS)
        .android_path("android")
        .build();
}
