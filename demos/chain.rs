// Run with `AFPD_BASE_URL=http://localhost:5000/ cargo run --example chain -- 42`.

use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    use afpd::{
        format_altitude, format_coordinate, format_speed, show_error,
        show_success, Axis, HtmlRegion, ProcedureClient,
    };

    tracing_subscriber::fmt::init();

    let procedure_id = std::env::args().nth(1).unwrap_or_else(|| "1".to_owned());
    let client = ProcedureClient::from_env()?;
    let mut region = HtmlRegion::new();

    match client.chain_waypoints(procedure_id.as_str()).await {
        Ok(report) => {
            for segment in report.segments()? {
                let start = &segment.start_waypoint;
                println!(
                    "{:<6} {} {} {} {} -> {} {:.1} NM {:03.0}°",
                    start.name,
                    format_coordinate(start.latitude, Axis::Latitude),
                    format_coordinate(start.longitude, Axis::Longitude),
                    format_altitude(start.altitude_constraint),
                    format_speed(start.speed_constraint),
                    segment.end_waypoint.name,
                    segment.distance,
                    segment.bearing,
                );
            }
            show_success(&mut region, "Waypoints chained");
        }
        Err(err) => show_error(&mut region, &err.to_string()),
    }

    println!("{}", region.to_html());
    Ok(())
}
