//! Build script for pointsman-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates controller.toml at compile time
//! - Generates the configuration constants the firmware is built with

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Integer type a key is emitted as
#[derive(Clone, Copy)]
enum Kind {
    U8,
    U16,
    U32,
}

impl Kind {
    fn name(self) -> &'static str {
        match self {
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
        }
    }
}

/// One configurable key: section, name, type, default, allowed range
struct Key {
    section: &'static str,
    name: &'static str,
    kind: Kind,
    default: i64,
    min: i64,
    max: i64,
}

const fn key(section: &'static str, name: &'static str, kind: Kind, default: i64, min: i64, max: i64) -> Key {
    Key {
        section,
        name,
        kind,
        default,
        min,
        max,
    }
}

const KEYS: &[Key] = &[
    key("controller", "channels", Kind::U8, 8, 1, 16),
    key("controller", "min_pos", Kind::U8, 0, 0, 255),
    key("controller", "max_pos", Kind::U8, 180, 0, 255),
    key("controller", "quiet_period_ms", Kind::U32, 20_000, 1, u32::MAX as i64),
    key("controller", "repeat_initial_ms", Kind::U32, 200, 1, 60_000),
    key("controller", "repeat_step_ms", Kind::U32, 10, 0, 60_000),
    key("controller", "repeat_floor_ms", Kind::U32, 50, 1, 60_000),
    key("controller", "long_hold_ms", Kind::U32, 2_000, 1, 600_000),
    // 0x00 and 0xFF are what blank or erased flash reads back as
    key("controller", "marker", Kind::U8, 0xA5, 0x01, 0xFE),
    key("controller", "poll_interval_ms", Kind::U32, 100, 1, 10_000),
    key("servo", "i2c_address", Kind::U8, 0x40, 0x08, 0x77),
    key("servo", "frequency_hz", Kind::U32, 50, 24, 1_526),
    key("servo", "min_pulse_us", Kind::U16, 500, 100, 3_000),
    key("servo", "max_pulse_us", Kind::U16, 2_500, 100, 3_000),
    key("servo", "max_angle", Kind::U8, 180, 1, 255),
    key("servo", "degrees_per_update", Kind::U8, 2, 1, 180),
    key("servo", "update_ms", Kind::U32, 20, 1, 1_000),
];

fn main() {
    setup_linker();
    let values = validate_config();
    generate_config(&values);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate controller.toml and return one value per entry of `KEYS`
fn validate_config() -> Vec<i64> {
    println!("cargo:rerun-if-changed=controller.toml");

    let config_path = Path::new("controller.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: controller.toml not found!                               ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a controller.toml configuration file.     ║\n\
            ║  Please create one in the pointsman-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read controller.toml                           ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in controller.toml                   ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    check_unknown_keys(&config, &mut errors);
    let values = read_values(&config, &mut errors);
    if errors.is_empty() {
        check_relations(&values, &mut errors);
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid controller configuration                         ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=controller.toml validated successfully");
    values
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reject sections and keys the firmware does not know (usually typos)
fn check_unknown_keys(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (section, body) in root {
        if !KEYS.iter().any(|k| k.section == section) {
            errors.push(format!("unknown section [{}]", section));
            continue;
        }
        let Some(table) = body.as_table() else {
            errors.push(format!("[{}] must be a table", section));
            continue;
        };
        for name in table.keys() {
            if !KEYS.iter().any(|k| k.section == section && k.name == name) {
                errors.push(format!("[{}] unknown key '{}'", section, name));
            }
        }
    }
}

/// Read every key, falling back to its default, and range-check it
fn read_values(config: &toml::Value, errors: &mut Vec<String>) -> Vec<i64> {
    KEYS.iter()
        .map(|k| {
            let value = config.get(k.section).and_then(|s| s.get(k.name));
            match value {
                None => k.default,
                Some(toml::Value::Integer(v)) if (k.min..=k.max).contains(v) => *v,
                Some(toml::Value::Integer(_)) => {
                    errors.push(format!(
                        "[{}] {} must be {}-{}",
                        k.section, k.name, k.min, k.max
                    ));
                    k.default
                }
                Some(_) => {
                    errors.push(format!("[{}] {} must be an integer", k.section, k.name));
                    k.default
                }
            }
        })
        .collect()
}

fn value(values: &[i64], name: &str) -> i64 {
    KEYS.iter()
        .position(|k| k.name == name)
        .map(|i| values[i])
        .unwrap()
}

/// Checks that involve more than one key
fn check_relations(values: &[i64], errors: &mut Vec<String>) {
    if value(values, "min_pos") >= value(values, "max_pos") {
        errors.push("[controller] min_pos must be below max_pos".to_string());
    }
    if value(values, "repeat_floor_ms") > value(values, "repeat_initial_ms") {
        errors.push("[controller] repeat_floor_ms must not exceed repeat_initial_ms".to_string());
    }
    if value(values, "min_pulse_us") >= value(values, "max_pulse_us") {
        errors.push("[servo] min_pulse_us must be below max_pulse_us".to_string());
    }
    if value(values, "max_pos") > value(values, "max_angle") {
        errors.push("[controller] max_pos must not exceed [servo] max_angle".to_string());
    }
}

/// Write the validated values as constants into OUT_DIR
fn generate_config(values: &[i64]) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("controller_config.rs")).unwrap();

    writeln!(f, "// Generated by build.rs from controller.toml").unwrap();
    for (k, v) in KEYS.iter().zip(values) {
        writeln!(
            f,
            "pub const {}_{}: {} = {};",
            k.section.to_uppercase(),
            k.name.to_uppercase(),
            k.kind.name(),
            v
        )
        .unwrap();
    }
}
