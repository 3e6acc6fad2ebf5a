//! Picks a UTM zone for a few cities and asks the advisor whether a 20 km buffer around them can be computed
//! in WGS84 or in the selected zone.
//!
//! Run with `RUST_LOG=debug` to see how each decision is made.

use std::error::Error;

use crs_advisor::advisor::{Advisor, AdvisorConfig, OperationKind, OperationRequest};
use crs_advisor::crs::{classify, CrsMetadata};
use crs_advisor::geo::{select_utm_lonlat, Extent};

const CITIES: &[(&str, f64, f64)] = &[
    ("Auckland", 174.76, -36.85),
    ("London", -0.13, 51.51),
    ("Quito", -78.47, -0.18),
    ("Suva", 178.44, -18.14),
    ("Longyearbyen", 15.63, 78.22),
    ("Alert", -62.35, 82.5),
];

const BUFFER_KM: f64 = 20.0;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let wgs84 = classify(Some(&CrsMetadata::parse("EPSG:4326")?))?;
    let advisors = [
        ("planar engine", Advisor::default()),
        (
            "spherical engine",
            Advisor::new(AdvisorConfig::default().with_spherical_engine(true))?,
        ),
    ];

    for (name, lon, lat) in CITIES {
        let utm = select_utm_lonlat(*lon, *lat)?;
        println!(
            "{name} ({lon}, {lat}): UTM zone {} (EPSG:{}){}",
            utm.zone_number(),
            utm.epsg_code(),
            if utm.polar_warning() {
                ", consider UPS"
            } else {
                ""
            }
        );

        let extent = Extent::from_diagonal_km(BUFFER_KM * 2.0)?;
        for (engine, advisor) in &advisors {
            let in_wgs84 = OperationRequest::new(OperationKind::DistanceBuffer, wgs84.clone());
            println!("  WGS84, {engine}: {}", advisor.advise(&in_wgs84));
        }

        let in_utm = OperationRequest::new(OperationKind::DistanceBuffer, utm.to_descriptor())
            .with_extent(extent);
        println!("  EPSG:{}: {}", utm.epsg_code(), advisors[0].1.advise(&in_utm));
    }

    Ok(())
}
