//! Text rendering for the `print` and `names` commands.

use wol_core::Device;

/// Width of the name column in the device table.
pub const NAME_COLUMN_WIDTH: usize = 16;

const TABLE_HEADER: &str = "Name            Mac";
const TABLE_RULE: &str = "---------------------------------";

/// Renders the registry as a two-column table.
///
/// ```text
/// Name            Mac
/// ---------------------------------
/// iMac            E0:D5:5E:6E:30:C9
/// ```
///
/// Names are left-justified in a 16-character column and cut at 16
/// characters when longer, in which case the MAC follows immediately.
/// The stored MAC text is upper-cased as-is; its separator is kept.
pub fn render_device_table(devices: &[Device]) -> String {
    let mut out = String::with_capacity(64 + devices.len() * 40);
    out.push_str(TABLE_HEADER);
    out.push('\n');
    out.push_str(TABLE_RULE);
    out.push('\n');
    for device in devices {
        out.push_str(&name_column(&device.name));
        out.push_str(&device.mac.to_uppercase());
        out.push('\n');
    }
    out
}

/// One device name per line, in registry order.
pub fn render_names(devices: &[Device]) -> String {
    devices.iter().fold(String::new(), |mut out, d| {
        out.push_str(&d.name);
        out.push('\n');
        out
    })
}

fn name_column(name: &str) -> String {
    let truncated: String = name.chars().take(NAME_COLUMN_WIDTH).collect();
    format!("{truncated:<width$}", width = NAME_COLUMN_WIDTH)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
