//! Check joystick availability.

use stickheat_common::config::AppConfig;
use stickheat_input::detect_best_sampler;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("StickHeat System Check");
    println!("{}", "=".repeat(50));

    list_devices(config);

    let mut sampler = detect_best_sampler(&config.device);
    println!();
    if sampler.is_connected() {
        println!("[OK] Sampler: {}", sampler.name());
        match sampler.sample() {
            Ok(snapshot) => println!(
                "     left=({}, {}) right=({}, {}) switch={:?} trigger={}",
                snapshot.left.x,
                snapshot.left.y,
                snapshot.right.x,
                snapshot.right.y,
                snapshot.switch,
                snapshot.trigger
            ),
            Err(e) => println!("[WARN] First sample failed: {e}"),
        }
        println!();
        println!("A joystick is available. StickHeat is ready.");
    } else {
        println!("[WARN] Sampler: {} (no joystick)", sampler.name());
        println!();
        println!("Heatmaps will not accumulate until a joystick is connected.");
    }

    Ok(())
}

#[cfg(target_os = "linux")]
fn list_devices(config: &AppConfig) {
    use stickheat_input::backends::evdev_joystick::{input_access_diagnostic, list_joysticks};

    let devices = list_joysticks(&config.device.axes);
    if devices.is_empty() {
        println!("[WARN] No event devices with absolute axes");
        println!("       {}", input_access_diagnostic());
        return;
    }

    println!("[OK] Devices with absolute axes: {}", devices.len());
    for (path, name, compatible) in &devices {
        println!(
            "     {} {} {}",
            path.display(),
            name,
            if *compatible { "(all mapped axes)" } else { "(missing mapped axes)" }
        );
    }
}

#[cfg(not(target_os = "linux"))]
fn list_devices(_config: &AppConfig) {
    println!("[WARN] Joystick enumeration is only implemented on Linux");
}
