//! Send an arbitrary function code and dump the reply

use uhppote::{Controller, LogSink, SerialNumber};

fn main() -> uhppote::Result<()> {
    let sink = LogSink::new(
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .finish(),
    );

    let ip = std::env::var("DEVICE_IP").unwrap_or_else(|_| "192.168.1.100".to_string());
    let serial = SerialNumber::try_from(
        std::env::var("DEVICE_SERIAL")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(423187757),
    )?;

    let mut controller = Controller::new(&ip, serial)?.with_log_sink(sink);

    // 0x20 is the status request; try other codes in 0x20..=0x82 here
    let reply = controller.execute(0x20, &[], true)?;
    println!("{}", reply.to_hex());

    Ok(())
}
