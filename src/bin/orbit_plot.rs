use clap::{Parser, ValueEnum};
use csv::ReaderBuilder;
use kinetic_impactor::units::km_to_au;
use plotters::prelude::*;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render original and post-impact orbits from a trajectory CSV"
)]
struct Cli {
    #[arg(long)]
    input: String,
    #[arg(long, default_value = "artifacts/orbits.png")]
    output: PathBuf,
    /// Ecliptic-frame projection plane
    #[arg(long, value_enum, default_value_t = Plane::Xy)]
    plane: Plane,
    #[arg(long, default_value_t = 1000)]
    width: u32,
    #[arg(long, default_value_t = 1000)]
    height: u32,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum Plane {
    Xy,
    Xz,
    Yz,
}

impl Plane {
    fn axes(self) -> (usize, usize, &'static str, &'static str) {
        match self {
            Plane::Xy => (0, 1, "X (AU)", "Y (AU)"),
            Plane::Xz => (0, 2, "X (AU)", "Z (AU)"),
            Plane::Yz => (1, 2, "Y (AU)", "Z (AU)"),
        }
    }
}

#[derive(Debug, Default)]
struct Tracks {
    original: Vec<[f64; 3]>,
    final_points: Vec<[f64; 3]>,
}

fn main() -> anyhow::Result<()> {
    kinetic_impactor::init_tracing();
    let cli = Cli::parse();
    let tracks = read_tracks(&cli.input)?;
    if tracks.original.is_empty() && tracks.final_points.is_empty() {
        return Err(anyhow::anyhow!("No trajectory samples in the provided CSV"));
    }

    let (ix, iy, x_desc, y_desc) = cli.plane.axes();
    let project = |points: &[[f64; 3]]| -> Vec<(f64, f64)> {
        points.iter().map(|p| (p[ix], p[iy])).collect()
    };
    let original = project(&tracks.original);
    let final_points = project(&tracks.final_points);

    // Square window centred on the Sun so the orbit shape is not distorted.
    let extent = original
        .iter()
        .chain(final_points.iter())
        .map(|(x, y)| x.abs().max(y.abs()))
        .fold(0.0_f64, f64::max)
        .max(1e-3)
        * 1.1;

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 16.0, FontStyle::Normal);

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Kinetic impactor effect on asteroid orbit", caption_font)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(-extent..extent, -extent..extent)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .label_style(label_font.clone())
        .x_labels(8)
        .y_labels(8)
        .x_label_formatter(&|v| format!("{v:.2}"))
        .y_label_formatter(&|v| format!("{v:.2}"))
        .draw()?;

    chart
        .draw_series(std::iter::once(Circle::new((0.0, 0.0), 8, YELLOW.filled())))?
        .label("Sun")
        .legend(|(x, y)| Circle::new((x + 10, y), 5, YELLOW.filled()));

    let original_color = RGBColor(200, 30, 30);
    chart
        .draw_series(LineSeries::new(
            original,
            ShapeStyle::from(&original_color).stroke_width(3),
        ))?
        .label("Original orbit")
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], original_color.stroke_width(3))
        });

    let final_color = RGBColor(30, 150, 60);
    chart
        .draw_series(LineSeries::new(
            final_points,
            ShapeStyle::from(&final_color).stroke_width(2),
        ))?
        .label("Modified orbit")
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], final_color.stroke_width(2))
        });

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(label_font)
        .draw()?;

    root.present()?;
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn read_tracks(path: &str) -> anyhow::Result<Tracks> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| anyhow::anyhow!("CSV missing '{name}' column"))
    };
    let orbit_idx = column("orbit")?;
    let coord_idx = [column("x_km")?, column("y_km")?, column("z_km")?];

    let mut tracks = Tracks::default();
    for rec in rdr.records() {
        let r = rec?;
        let mut point = [0.0; 3];
        for (slot, idx) in point.iter_mut().zip(coord_idx) {
            let km: f64 = r.get(idx).unwrap_or("").trim().parse().unwrap_or(f64::NAN);
            *slot = km_to_au(km);
        }
        if !point.iter().all(|c| c.is_finite()) {
            continue;
        }
        match r.get(orbit_idx).map(str::trim) {
            Some(orbit) if orbit.eq_ignore_ascii_case("original") => tracks.original.push(point),
            Some(orbit) if orbit.eq_ignore_ascii_case("final") => tracks.final_points.push(point),
            _ => {}
        }
    }
    Ok(tracks)
}
