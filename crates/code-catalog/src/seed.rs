//! Seed Records for the Session Cache
//!
//! Roughly the twenty codes that account for the bulk of consumer lookups,
//! plus one representative each from the chassis, body, and network ranges.

use dtc_model::{DiagnosticRecord, DiyDifficulty, SafetyStatus, Severity};

#[allow(clippy::too_many_arguments)]
fn record(
    code: &str,
    title: &str,
    description: &str,
    summary: &str,
    symptoms: &[&str],
    causes: &[&str],
    severity: Severity,
    category: &str,
    safety: SafetyStatus,
    cost: &str,
    diy: DiyDifficulty,
    similar: &[&str],
) -> DiagnosticRecord {
    DiagnosticRecord {
        code: code.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        plain_english_summary: summary.to_string(),
        symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
        causes: causes.iter().map(|s| s.to_string()).collect(),
        severity,
        category: category.to_string(),
        safety_status: safety,
        repair_cost_estimate_range: cost.to_string(),
        diy_difficulty: diy,
        similar_codes: similar.iter().map(|s| s.to_string()).collect(),
    }
}

/// The built-in catalog, pre-normalized and ready to key a session cache.
pub fn seed_records() -> Vec<DiagnosticRecord> {
    vec![
        record(
            "P0300",
            "Random/Multiple Cylinder Misfire Detected",
            "The engine control module has detected misfires occurring across multiple cylinders or in a random pattern rather than in one specific cylinder.",
            "Your engine is stumbling in more than one cylinder. Driving on a misfire can melt the catalytic converter, so get this looked at soon.",
            &["Rough idle", "Engine shaking or stumbling", "Flashing check engine light", "Loss of power under load"],
            &["Worn spark plugs or coils", "Vacuum leak", "Low fuel pressure", "Clogged fuel injectors"],
            Severity::High,
            "Ignition / Misfire",
            SafetyStatus::Caution,
            "$150 - $1,200",
            DiyDifficulty::Moderate,
            &["P0301", "P0302", "P0303", "P0304"],
        ),
        record(
            "P0301",
            "Cylinder 1 Misfire Detected",
            "The engine control module has detected repeated misfires isolated to cylinder number one.",
            "Cylinder 1 is misfiring. Often it's just a spark plug or coil, but don't ignore it.",
            &["Rough idle", "Hesitation on acceleration", "Check engine light"],
            &["Failed spark plug", "Failed ignition coil", "Leaking fuel injector", "Low compression in cylinder 1"],
            Severity::High,
            "Ignition / Misfire",
            SafetyStatus::Caution,
            "$100 - $800",
            DiyDifficulty::Moderate,
            &["P0300", "P0302"],
        ),
        record(
            "P0171",
            "System Too Lean (Bank 1)",
            "The air-fuel mixture on engine bank 1 contains more air than the target ratio, and fuel trim has hit its correction limit.",
            "Your engine is getting too much air or too little fuel. Usually a vacuum leak or a dirty sensor.",
            &["Rough idle", "Hesitation", "Poor fuel economy", "Check engine light"],
            &["Vacuum leak", "Dirty mass air flow sensor", "Weak fuel pump", "Clogged fuel filter"],
            Severity::Medium,
            "Fuel & Air Metering",
            SafetyStatus::Safe,
            "$100 - $600",
            DiyDifficulty::Moderate,
            &["P0174", "P0101"],
        ),
        record(
            "P0174",
            "System Too Lean (Bank 2)",
            "The air-fuel mixture on engine bank 2 contains more air than the target ratio, and fuel trim has hit its correction limit.",
            "Same lean condition as P0171, but on the other side of a V-type engine.",
            &["Rough idle", "Hesitation", "Poor fuel economy"],
            &["Vacuum leak", "Dirty mass air flow sensor", "Weak fuel pump"],
            Severity::Medium,
            "Fuel & Air Metering",
            SafetyStatus::Safe,
            "$100 - $600",
            DiyDifficulty::Moderate,
            &["P0171"],
        ),
        record(
            "P0420",
            "Catalyst System Efficiency Below Threshold (Bank 1)",
            "The downstream oxygen sensor shows the catalytic converter on bank 1 is no longer storing oxygen efficiently.",
            "Your catalytic converter isn't cleaning the exhaust like it should. The car is fine to drive, but it will fail an emissions test.",
            &["Check engine light", "Slight loss of power", "Sulfur smell from exhaust", "Failed emissions test"],
            &["Aging catalytic converter", "Exhaust leak upstream of the sensor", "Failing oxygen sensor", "Engine misfires sending raw fuel into the catalyst"],
            Severity::Medium,
            "Emissions",
            SafetyStatus::Safe,
            "$400 - $2,400",
            DiyDifficulty::Hard,
            &["P0430", "P0171"],
        ),
        record(
            "P0430",
            "Catalyst System Efficiency Below Threshold (Bank 2)",
            "The downstream oxygen sensor shows the catalytic converter on bank 2 is no longer storing oxygen efficiently.",
            "Same catalytic converter problem as P0420, but on the other engine bank.",
            &["Check engine light", "Sulfur smell from exhaust", "Failed emissions test"],
            &["Aging catalytic converter", "Exhaust leak", "Failing oxygen sensor"],
            Severity::Medium,
            "Emissions",
            SafetyStatus::Safe,
            "$400 - $2,400",
            DiyDifficulty::Hard,
            &["P0420"],
        ),
        record(
            "P0442",
            "Evaporative Emission System Leak Detected (Small Leak)",
            "The evaporative emissions system has detected a small leak in the fuel vapor containment system.",
            "Fuel vapor is escaping somewhere, often just a loose gas cap. Cheap to check, harmless to drive with.",
            &["Check engine light", "Faint fuel smell"],
            &["Loose or worn gas cap", "Cracked EVAP hose", "Failing purge valve"],
            Severity::Low,
            "Evaporative Emissions",
            SafetyStatus::Safe,
            "$0 - $350",
            DiyDifficulty::Easy,
            &["P0455", "P0456"],
        ),
        record(
            "P0455",
            "Evaporative Emission System Leak Detected (Large Leak)",
            "The evaporative emissions system has detected a large leak, most commonly a missing or badly seated fuel cap.",
            "A big vapor leak, nine times out of ten it's the gas cap. Tighten it and see if the light clears.",
            &["Check engine light", "Fuel smell near the car"],
            &["Missing or loose gas cap", "Disconnected EVAP hose", "Cracked charcoal canister"],
            Severity::Low,
            "Evaporative Emissions",
            SafetyStatus::Safe,
            "$0 - $400",
            DiyDifficulty::Easy,
            &["P0442", "P0457"],
        ),
        record(
            "P0401",
            "Exhaust Gas Recirculation Flow Insufficient",
            "The EGR system is not flowing enough exhaust gas back into the intake to meet the commanded rate.",
            "The valve that recirculates exhaust is sticking or clogged with carbon. Common on higher-mileage engines.",
            &["Pinging under acceleration", "Rough idle", "Check engine light"],
            &["Carbon-clogged EGR passages", "Stuck EGR valve", "Failed EGR vacuum solenoid"],
            Severity::Medium,
            "Emissions",
            SafetyStatus::Safe,
            "$150 - $500",
            DiyDifficulty::Moderate,
            &["P0402", "P0404"],
        ),
        record(
            "P0101",
            "Mass Air Flow Circuit Range/Performance",
            "The mass air flow sensor reading disagrees with what the engine control module expects for the current throttle and RPM.",
            "The sensor that measures incoming air is reading wrong, often it just needs cleaning.",
            &["Hesitation", "Rough idle", "Hard starting", "Poor fuel economy"],
            &["Contaminated MAF sensor element", "Air leak between MAF and throttle", "Failing MAF sensor"],
            Severity::Medium,
            "Fuel & Air Metering",
            SafetyStatus::Safe,
            "$50 - $400",
            DiyDifficulty::Easy,
            &["P0171", "P0102"],
        ),
        record(
            "P0113",
            "Intake Air Temperature Sensor Circuit High",
            "The intake air temperature sensor is reporting an implausibly high resistance, which reads as extremely cold air.",
            "A temperature sensor in the intake has an open circuit. Usually a cheap sensor or a loose connector.",
            &["Check engine light", "Slightly rich running", "Hard cold starts"],
            &["Unplugged or corroded connector", "Failed IAT sensor", "Broken wiring"],
            Severity::Low,
            "Fuel & Air Metering",
            SafetyStatus::Safe,
            "$30 - $150",
            DiyDifficulty::Easy,
            &["P0112"],
        ),
        record(
            "P0128",
            "Coolant Thermostat Below Regulating Temperature",
            "The engine coolant is taking too long to reach operating temperature, indicating the thermostat is stuck open.",
            "Your engine runs cold because the thermostat is stuck open. Wastes fuel and wears the engine faster.",
            &["Temperature gauge reads low", "Weak cabin heat", "Poor fuel economy"],
            &["Stuck-open thermostat", "Low coolant level", "Failed coolant temperature sensor"],
            Severity::Low,
            "Engine Cooling",
            SafetyStatus::Safe,
            "$80 - $300",
            DiyDifficulty::Moderate,
            &["P0125"],
        ),
        record(
            "P0133",
            "O2 Sensor Circuit Slow Response (Bank 1, Sensor 1)",
            "The upstream oxygen sensor on bank 1 is switching between rich and lean more slowly than specification.",
            "The front oxygen sensor is getting lazy with age. Fuel economy suffers until it's replaced.",
            &["Poor fuel economy", "Check engine light", "Occasional rough idle"],
            &["Aged oxygen sensor", "Exhaust leak near the sensor", "Silicone or oil contamination"],
            Severity::Low,
            "Emissions",
            SafetyStatus::Safe,
            "$100 - $300",
            DiyDifficulty::Moderate,
            &["P0135", "P0420"],
        ),
        record(
            "P0217",
            "Engine Overheat Condition",
            "The engine control module has recorded coolant temperature above the critical overheat threshold.",
            "Your engine overheated. Stop driving: continuing can warp the head or blow the head gasket.",
            &["Temperature gauge pegged high", "Steam from the hood", "Loss of power", "Coolant smell"],
            &["Low coolant from a leak", "Failed water pump", "Stuck-closed thermostat", "Failed radiator fan"],
            Severity::Critical,
            "Engine Cooling",
            SafetyStatus::StopImmediately,
            "$150 - $3,000",
            DiyDifficulty::Hard,
            &["P0128", "P0118"],
        ),
        record(
            "P0500",
            "Vehicle Speed Sensor Malfunction",
            "The vehicle speed sensor signal is missing or implausible compared to engine speed and throttle data.",
            "The computer has lost the speed signal. The speedometer and shifting may act up.",
            &["Erratic or dead speedometer", "Harsh or late shifts", "ABS light"],
            &["Failed speed sensor", "Damaged sensor wiring", "Faulty instrument cluster"],
            Severity::Medium,
            "Vehicle Speed & Idle Control",
            SafetyStatus::Caution,
            "$100 - $350",
            DiyDifficulty::Moderate,
            &["P0501", "P0503"],
        ),
        record(
            "P0562",
            "System Voltage Low",
            "The engine control module has observed battery or charging system voltage below the minimum operating threshold.",
            "Your charging system is undercharging. The car may stall or fail to restart.",
            &["Dim lights", "Battery warning light", "Hard starting", "Stalling"],
            &["Worn alternator", "Slipping accessory belt", "Corroded battery terminals", "Aged battery"],
            Severity::High,
            "Charging System",
            SafetyStatus::Caution,
            "$150 - $800",
            DiyDifficulty::Moderate,
            &["P0563", "P0620"],
        ),
        record(
            "P0606",
            "Engine Control Module Processor Fault",
            "The engine control module has failed its internal processor self-test.",
            "The engine computer itself reported an internal fault. Have it professionally diagnosed before replacing anything.",
            &["Check engine light", "Stalling", "No-start conditions", "Erratic engine behavior"],
            &["Internal ECM failure", "Corroded ECM grounds", "Voltage spikes from jump starting"],
            Severity::High,
            "Computer & Output Circuits",
            SafetyStatus::Caution,
            "$500 - $1,500",
            DiyDifficulty::Hard,
            &["P0601", "P0605"],
        ),
        record(
            "P0700",
            "Transmission Control System Malfunction",
            "The transmission control module has detected a fault and requested the check engine light; a transmission-specific code is stored alongside.",
            "Your transmission computer logged a problem. This code is the messenger, a scan will show the real fault underneath.",
            &["Check engine light", "Harsh shifting", "Transmission stuck in one gear"],
            &["Transmission solenoid fault", "Low transmission fluid", "Internal transmission wear", "TCM wiring issues"],
            Severity::High,
            "Transmission",
            SafetyStatus::Caution,
            "$100 - $2,500",
            DiyDifficulty::Hard,
            &["P0740", "P0750"],
        ),
        record(
            "P0740",
            "Torque Converter Clutch Circuit Malfunction",
            "The torque converter clutch solenoid circuit is open, shorted, or the clutch is failing to engage.",
            "The part that locks the transmission to the engine at cruise isn't engaging. Expect worse fuel economy and possible shudder.",
            &["Shudder at highway speed", "Higher RPM at cruise", "Poor fuel economy", "Transmission overheating"],
            &["Failed TCC solenoid", "Degraded transmission fluid", "Worn torque converter"],
            Severity::Medium,
            "Transmission",
            SafetyStatus::Caution,
            "$200 - $1,500",
            DiyDifficulty::Hard,
            &["P0700", "P0741"],
        ),
        record(
            "C0035",
            "Left Front Wheel Speed Sensor Circuit",
            "The ABS module has lost or distrusts the signal from the left front wheel speed sensor.",
            "A wheel sensor for the ABS has failed. Normal brakes still work, but ABS and traction control may be offline.",
            &["ABS warning light", "Traction control light", "ABS engaging at low speed"],
            &["Failed wheel speed sensor", "Damaged tone ring", "Corroded sensor wiring"],
            Severity::Medium,
            "Chassis / ABS",
            SafetyStatus::Caution,
            "$120 - $350",
            DiyDifficulty::Moderate,
            &["C0040", "C0050"],
        ),
        record(
            "B0081",
            "Passenger Seat Occupancy Sensor Fault",
            "The airbag control module has detected a fault in the passenger seat occupant classification sensor.",
            "The sensor that decides whether to arm the passenger airbag is faulty. The airbag may not deploy correctly.",
            &["Airbag warning light", "Passenger airbag-off indicator stuck"],
            &["Failed occupancy sensor mat", "Connector damage under the seat", "Airbag module fault"],
            Severity::High,
            "Body / Restraints",
            SafetyStatus::Caution,
            "$200 - $900",
            DiyDifficulty::Hard,
            &["B0001"],
        ),
        record(
            "U0100",
            "Lost Communication With Engine Control Module",
            "Another module on the CAN bus is unable to communicate with the engine control module.",
            "The car's computers have stopped talking to the engine computer. Can cause a no-start; needs proper diagnosis.",
            &["No-start", "Multiple warning lights", "Stalling", "Gauges dropping out"],
            &["CAN bus wiring fault", "Failed ECM", "Poor ECM power or ground", "Aftermarket electronics interference"],
            Severity::High,
            "Network Communication",
            SafetyStatus::Caution,
            "$100 - $1,200",
            DiyDifficulty::Hard,
            &["U0101", "U0121"],
        ),
    ]
}
