//! Read and print a board's status

use std::time::Duration;

use uhppote::{Controller, Door, Endpoint, LogSink, SerialNumber, TcpTransport};

fn main() -> uhppote::Result<()> {
    // Log both the controller and its transport to stdout
    let sink = LogSink::new(
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .finish(),
    );

    // Change to your board's address and serial number
    let ip = std::env::var("DEVICE_IP").unwrap_or_else(|_| "192.168.1.100".to_string());
    let serial: SerialNumber = std::env::var("DEVICE_SERIAL")
        .unwrap_or_else(|_| "423187757".to_string())
        .parse()?;

    let transport = TcpTransport::new(Endpoint::parse(&ip, 60000)?)
        .with_connect_timeout(Duration::from_secs(3))
        .with_read_timeout(Duration::from_secs(5))
        .with_log_sink(sink.clone());

    let mut controller = Controller::with_transport(transport, serial)
        .with_connect_attempts(3)?
        .with_log_sink(sink);

    println!("Reading status of {} at {}...", serial, ip);
    let status = controller.status()?;

    println!("{}", status);
    for door in Door::ALL {
        println!(
            "  {}: {}, button {}, relay {}",
            door,
            if status.door_open(door) { "open" } else { "closed" },
            if status.button_pressed(door) { "pressed" } else { "released" },
            if status.door_unlocked(door) { "on" } else { "off" },
        );
    }
    println!("  alarms: {:?}", status.alarms());

    Ok(())
}
