use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use geomath::delaunay::{DelaunayTriangulation, SweepCfg};
use geomath::mat3::{Svd3, DEFAULT_ITERATIONS};
use geomath::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Run the 3x3 SVD and the constrained Delaunay sweep from the shell")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Decompose a row-major 3x3 matrix and print U, Σ, V as JSON
    Svd {
        /// Nine comma-separated entries, row-major
        #[arg(long, value_delimiter = ',', num_args = 9, allow_hyphen_values = true)]
        matrix: Vec<f64>,
        #[arg(long, default_value_t = DEFAULT_ITERATIONS)]
        iterations: u32,
    },
    /// Triangulate a JSON point set and write triangles, constraints and hull
    Triangulate {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
        /// Disable the basin-filling heuristic after each insertion
        #[arg(long)]
        no_heuristic: bool,
    },
    /// Print a small provenance JSON block
    Report,
}

/// `{ "points": [[x, y], ...], "constraints": [[i, j], ...] }`
#[derive(Debug, Deserialize, Serialize)]
struct TriangulateInput {
    points: Vec<[f64; 2]>,
    #[serde(default)]
    constraints: Vec<[usize; 2]>,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
struct TriangulateOutput {
    triangles: Vec<[usize; 3]>,
    constrained_edges: Vec<[usize; 2]>,
    hull: Vec<usize>,
}

#[derive(Debug, Serialize)]
struct SvdOutput {
    u: [[f64; 3]; 3],
    sigma: [f64; 3],
    v: [[f64; 3]; 3],
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Svd { matrix, iterations } => svd(&matrix, iterations),
        Action::Triangulate {
            input,
            out,
            no_heuristic,
        } => {
            let cfg = SweepCfg {
                half_pi_heuristic: !no_heuristic,
                ..SweepCfg::default()
            };
            triangulate(Path::new(&input), Path::new(&out), cfg).map(|_| ())
        }
        Action::Report => report(),
    }
}

fn rows(m: &[f64; 9]) -> [[f64; 3]; 3] {
    [
        [m[0], m[1], m[2]],
        [m[3], m[4], m[5]],
        [m[6], m[7], m[8]],
    ]
}

fn svd(matrix: &[f64], iterations: u32) -> Result<()> {
    let a: [f64; 9] = matrix
        .try_into()
        .with_context(|| format!("expected 9 matrix entries, got {}", matrix.len()))?;
    tracing::info!(iterations, "svd");
    let res = Svd3::with_iterations(&a, iterations);
    let out = SvdOutput {
        u: rows(&res.u),
        sigma: res.singular_values(),
        v: rows(&res.v),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn triangulate(input: &Path, out: &Path, cfg: SweepCfg) -> Result<TriangulateOutput> {
    let raw = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let doc: TriangulateInput = serde_json::from_slice(&raw)
        .with_context(|| format!("parsing {}", input.display()))?;
    let points: Vec<_> = doc.points.iter().map(|p| Vec2::new(p[0], p[1])).collect();
    let constraints: Vec<_> = doc.constraints.iter().map(|c| (c[0], c[1])).collect();
    tracing::info!(
        input = %input.display(),
        out = %out.display(),
        points = points.len(),
        constraints = constraints.len(),
        heuristic = cfg.half_pi_heuristic,
        "triangulate"
    );

    let dt = DelaunayTriangulation::triangulate_with(&points, &constraints, cfg)
        .with_context(|| format!("triangulating {}", input.display()))?;
    let violations = dt.find_delaunay_violations().len();
    if !dt.is_valid() {
        bail!("triangulation of {} failed consistency checks", input.display());
    }
    let result = TriangulateOutput {
        triangles: dt.triangle_indices(),
        constrained_edges: dt.constrained_edge_indices(),
        hull: dt.convex_hull().iter().map(|v| v.0).collect(),
    };
    tracing::info!(
        triangles = result.triangles.len(),
        hull = result.hull.len(),
        violations,
        "triangulated"
    );

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(&result)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let payload = provenance::Payload::new(serde_json::json!({
        "input": input.to_string_lossy(),
        "points": points.len(),
        "constraints": constraints.len(),
        "alpha": cfg.alpha,
        "half_pi_heuristic": cfg.half_pi_heuristic,
        "violations": violations,
    }));
    let prov = provenance::write_sidecar(out, payload)?;
    tracing::info!(provenance = %prov.display(), "sidecar");
    Ok(result)
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "version": geomath::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn triangulate_round_trip() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("square.json");
        let doc = TriangulateInput {
            points: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
            constraints: vec![[0, 2]],
        };
        std::fs::write(&input, serde_json::to_vec(&doc).unwrap()).unwrap();
        let out = dir.path().join("nested/square.out.json");

        let result = triangulate(&input, &out, SweepCfg::default()).unwrap();
        assert_eq!(result.triangles.len(), 2);
        assert_eq!(result.constrained_edges, vec![[0, 2]]);
        assert_eq!(result.hull.len(), 4);

        let written: TriangulateOutput =
            serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(written, result);
        let sidecar = dir.path().join("nested/square.out.provenance.json");
        let prov: serde_json::Value =
            serde_json::from_slice(&std::fs::read(sidecar).unwrap()).unwrap();
        assert_eq!(prov["params"]["points"], 4);
        assert_eq!(prov["params"]["violations"], 0);
    }

    #[test]
    fn triangulate_reports_bad_constraint() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.json");
        std::fs::write(&input, r#"{"points": [[0,0],[1,0],[0,1]], "constraints": [[0, 7]]}"#)
            .unwrap();
        let err = triangulate(&input, &dir.path().join("o.json"), SweepCfg::default())
            .unwrap_err();
        assert!(format!("{err:#}").contains("constraint"));
    }

    #[test]
    fn missing_input_names_the_path() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("absent.json");
        let err = triangulate(&input, &dir.path().join("o.json"), SweepCfg::default())
            .unwrap_err();
        assert!(format!("{err:#}").contains("absent.json"));
    }
}
