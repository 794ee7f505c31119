//! # ToolCalc CLI Application
//!
//! Terminal front end for the milling parameter engine. Prompts for a tool
//! geometry, runs a calculation against the built-in catalog, and prints the
//! derived parameters, the check battery, and the raw JSON record.

use std::io::{self, BufRead, Write};

use cnc_core::catalog::{MaterialId, OperationId, Tool, ToolGeometry, ToolType};
use cnc_core::engine::{CalculationRequest, Engine};
use cnc_core::factors::{Coating, Coolant, SurfaceQuality};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_choice<T: Copy>(prompt: &str, choices: &[(&str, T)], default: T) -> T {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    let input = input.trim().to_lowercase();
    choices
        .iter()
        .find(|(name, _)| *name == input)
        .map(|(_, value)| *value)
        .unwrap_or(default)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    println!("ToolCalc CLI - Milling Parameter Calculator");
    println!("===========================================");
    println!();

    let dc_mm = prompt_f64("Tool diameter DC (mm) [6.0]: ", 6.0);
    let lcf_mm = prompt_f64("Flute length LCF (mm) [18.0]: ", 18.0);
    let nof = prompt_f64("Number of flutes [2]: ", 2.0).max(1.0) as u8;

    let material = prompt_choice(
        "Material (softwood/hardwood/acrylic/aluminium/brass/copper/mild_steel/stainless_steel) \
         [aluminium]: ",
        &[
            ("softwood", MaterialId::Softwood),
            ("hardwood", MaterialId::Hardwood),
            ("acrylic", MaterialId::Acrylic),
            ("aluminium", MaterialId::Aluminium),
            ("brass", MaterialId::Brass),
            ("copper", MaterialId::Copper),
            ("mild_steel", MaterialId::MildSteel),
            ("stainless_steel", MaterialId::StainlessSteel),
        ],
        MaterialId::Aluminium,
    );

    let operation = prompt_choice(
        "Operation (slot_rough/slot_finish/pocket/contour_2d/face_rough/face_finish) \
         [slot_rough]: ",
        &[
            ("slot_rough", OperationId::SlotRough),
            ("slot_finish", OperationId::SlotFinish),
            ("pocket", OperationId::Pocket),
            ("contour_2d", OperationId::Contour2d),
            ("face_rough", OperationId::FaceRough),
            ("face_finish", OperationId::FaceFinish),
        ],
        OperationId::SlotRough,
    );

    let coating = prompt_choice(
        "Coating (none/tin/tialn/altin/diamond/carbide) [none]: ",
        &[
            ("none", Coating::None),
            ("tin", Coating::Tin),
            ("tialn", Coating::Tialn),
            ("altin", Coating::Altin),
            ("diamond", Coating::Diamond),
            ("carbide", Coating::Carbide),
        ],
        Coating::None,
    );

    let mut engine = Engine::new();
    let tool = Tool {
        id: "cli-demo".to_string(),
        name: format!("{dc_mm} mm {nof}-flute end mill"),
        tool_type: ToolType::FlatEndMill,
        geometry: ToolGeometry {
            dc_mm,
            lcf_mm,
            dcon_mm: dc_mm,
            oal_mm: lcf_mm + 25.0,
            nof,
        },
        presets: Vec::new(),
    };

    if let Err(e) = engine.add_tool(tool) {
        eprintln!("Invalid tool geometry: {}", e);
        std::process::exit(1);
    }

    let mut request = CalculationRequest::new("cli-demo", material, operation);
    request.coating = coating;
    request.surface_quality = SurfaceQuality::Standard;
    request.coolant = Coolant::Wet;

    println!();
    match engine.calculate(&request) {
        Ok(result) => {
            let p = &result.parameters;
            println!("═══════════════════════════════════════");
            println!("  CUTTING PARAMETERS");
            println!("═══════════════════════════════════════");
            println!();
            println!("Speeds:");
            println!("  vc = {:.1} m/min (base {:.1} × coating {:.2})",
                p.vc_m_min, p.vc_base_m_min, p.coating_factor);
            println!("  n  = {:.0} RPM", p.n_rpm);
            println!();
            println!("Feeds:");
            println!("  fz = {:.4} mm", p.fz_mm);
            println!("  vf = {:.0} mm/min (entry {:.0}, ramp {:.0}, plunge {:.0})",
                p.feeds.vf_mm_min,
                p.feeds.entry_mm_min,
                p.feeds.ramp_mm_min,
                p.feeds.plunge_mm_min);
            println!();
            println!("Engagement:");
            println!("  ae = {:.3} mm", p.ae_mm);
            println!("  ap = {:.3} mm (ref: {:?})", p.ap_mm, p.ap_reference);
            println!();
            println!("Load:");
            println!("  MRR    = {:.2} cm³/min", p.mrr_cm3_min);
            println!("  Power  = {:.3} kW", p.power_kw);
            println!("  Torque = {:.3} Nm", p.torque_nm);
            println!();
            println!("Process:");
            println!("  Chip temp  = {:.1} °C", p.chip_temperature_c);
            println!("  Chips      = {}", p.chip_formation.display_name());
            println!("  Stability  = {} (L/D {:.2}, ×{:.2})",
                p.stability.class, p.stability.ld_ratio, p.stability.reduction_factor);
            println!();
            println!("Checks:");
            for check in &result.validation.checks {
                println!("  {:<28} {} [{}]",
                    check.name,
                    status_icon(check.passed),
                    check.severity.as_str());
            }
            println!();
            println!("═══════════════════════════════════════");
            println!("  RESULT: {}",
                if result.validation.all_passed { "PASS" } else { "FAIL" });
            println!("═══════════════════════════════════════");

            if !result.warnings.is_empty() {
                println!();
                println!("Warnings:");
                for warning in &result.warnings {
                    println!("  - {}", warning);
                }
            }

            println!();
            println!("JSON Output (for API use):");
            if let Ok(json) = serde_json::to_string_pretty(&result) {
                println!("{}", json);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            std::process::exit(1);
        }
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[FAIL]"
    }
}
