//! LabZen Status Tool
//!
//! Runtime status and usage instructions for tool clients.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Usage instructions for AI assistants
pub const LAB_INSTRUCTIONS: &str = r#"
# LabZen Calculation Instructions

LabZen runs three independent bench calculators. Every tool is stateless:
pass everything the calculation needs in each call.

---

## Molarity

Tools: `calculate_mass`, `calculate_molarity`, `calculate_volume`, `list_reagents`

- Supply either `molecular_weight` (g/mol) or a `reagent` preset name.
  An explicit molecular weight always wins over the preset.
- Units are strings:
  - concentration: `M`, `mM`, `µM` (or `uM`), `nM`
  - volume: `L`, `mL`, `µL` (or `uL`)
  - mass: `g`, `mg`, `µg` (or `ug`)
- `result_unit` is optional; results default to g, M, or L.

**Example - 150 mM NaCl, 500 mL:**
```
calculate_mass(reagent: "NaCl", concentration: 150, concentration_unit: "mM",
               volume: 500, volume_unit: "mL")
→ Mass required: 4.3830 g
```

---

## DNA Assembly

Tool: `plan_assembly`

- Exactly one fragment must have `is_vector: true`.
- Fragment names must be unique.
- Lengths in bp, stock concentrations in ng/µL.
- Defaults: 20 µL reaction, 2X master mix, 0.05 pmol vector, 2-fold insert excess.
- Every insert gets `insert_molar_excess × vector_pmol`, no matter how many inserts.
- Mass uses 650 g/mol per base pair.

If the plan fails with "volumes exceed total reaction volume", lower
`vector_pmol`, use more concentrated stocks, or raise the reaction volume.

---

## BCA Protein Assay

Tools: `fit_bca_standard_curve`, `estimate_protein`

- Paste 9 lines, one per standard, each with two absorbance readings
  (duplicates) separated by spaces or tabs.
- Line order is the concentration: 2.0, 1.5, 1.0, 0.75, 0.5, 0.25, 0.125,
  0.025, 0.0 mg/mL. Extra lines are ignored.
- To use a different ladder, pass `ladder` as a JSON array of concentrations
  in mg/mL, in row order, e.g. `[1.6, 0.8, 0.0]`.
- Sample readings below the blank are reported as 0 mg/mL.
- Several readings at different dilutions are averaged; `total_volume_ul`
  turns the mean into a total yield in mg.
"#;

/// Runtime status of the LabZen service
#[derive(Debug, Clone, Serialize)]
pub struct LabZenStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    pub fn get_status(&self) -> LabZenStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        LabZenStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}
