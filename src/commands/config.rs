//! `vault-sync config` commands: the settings surface.

use std::path::Path;

use crate::context::ServiceContext;
use crate::settings::SettingField;
use crate::store::SettingsStore;

/// Print each setting's label, description and current value.
pub fn show(ctx: &ServiceContext, settings_path: &Path) {
    let store = SettingsStore::new(ctx, settings_path);
    print!("{}", render(&store));
}

/// Set one field and persist the whole settings object.
///
/// Save failures are logged by the store and do not fail the command.
pub fn set(ctx: &ServiceContext, settings_path: &Path, field: SettingField, value: &str) {
    let store = SettingsStore::new(ctx, settings_path);
    let settings = store.update(field, value);
    println!("{}: {}", field.label(), display_value(field, settings.get(field)));
}

fn render(store: &SettingsStore<'_>) -> String {
    let settings = store.load();
    let mut out = format!("Settings file: {}\n", store.path().display());
    for field in SettingField::ALL {
        out.push_str(&format!(
            "\n{}\n  {}\n  {}\n",
            field.label(),
            field.description(),
            display_value(field, settings.get(field)),
        ));
    }
    out
}

fn display_value(field: SettingField, value: &str) -> String {
    if value.is_empty() {
        format!("<{}>", field.placeholder())
    } else {
        value.to_string()
    }
}
