use heat_conduction_toolbox::conduction::{
    summary_rows, table_energy, Element, InputUnits, InvalidInputPolicy, MaterialLayout, Parameter,
    ParameterError, ParameterOutcome, Simulation, SinkCoupling, StepperConfig,
};
use heat_conduction_toolbox::units::{AreaUnit, LengthUnit, TemperatureUnit};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label}: actual={actual}, expected={expected}, diff={diff}, tol={tol}"
    );
}

fn single() -> Simulation {
    Simulation::new(StepperConfig::default(), MaterialLayout::Single)
}

fn three() -> Simulation {
    Simulation::new(StepperConfig::default(), MaterialLayout::ThreeMaterial)
}

#[test]
fn first_step_heats_first_segment_by_flux_over_heat_capacity() {
    let mut sim = single();
    sim.step();
    let segs = sim.segment_temperatures(0).unwrap();
    // flux = 0.5·0.02·80/0.1 = 8 W, ΔT = 8·0.1 / (0.02·0.1·1000)
    assert_close("seg0", segs[0], 20.4, 1e-9);
    assert!(segs[1] > 20.0 && segs[1] < segs[0]);
    assert_eq!(sim.tick_count(), 1);
    assert_close("elapsed", sim.elapsed_s(), 0.1, 1e-12);
}

#[test]
fn segment_count_never_changes() {
    let config = StepperConfig {
        segment_count: 25,
        ..StepperConfig::default()
    };
    let mut sim = Simulation::new(config, MaterialLayout::ThreeMaterial);
    for _ in 0..50 {
        sim.step();
        for id in 0..sim.material_count() {
            assert_eq!(sim.segment_temperatures(id).unwrap().len(), 25);
        }
    }
}

#[test]
fn zero_segment_count_falls_back_to_default() {
    let config = StepperConfig {
        segment_count: 0,
        time_step_s: -1.0,
        ..StepperConfig::default()
    };
    let sim = Simulation::new(config, MaterialLayout::Single);
    assert_eq!(sim.segment_temperatures(0).unwrap().len(), 10);
    assert_close("dt", sim.config().time_step_s, 0.1, 0.0);
}

#[test]
fn clamped_profile_is_monotone_between_source_and_sink() {
    let mut sim = single();
    sim.step_n(500);
    let segs = sim.segment_temperatures(0).unwrap();
    assert!(sim.source_temperature() >= segs[0]);
    for w in segs.windows(2) {
        assert!(w[0] >= w[1], "profile not monotone: {segs:?}");
    }
    assert!(segs[segs.len() - 1] >= sim.sink_temperature());
    assert!(sim.sink_temperature() >= 20.0);
    assert!(segs[0] > 20.0);
}

#[test]
fn reset_restores_ambient_and_default_source() {
    for mut sim in [single(), three()] {
        sim.set_parameter(Parameter::SourceTemperature, "250").unwrap();
        sim.step_n(40);
        sim.reset();
        for id in 0..sim.material_count() {
            assert_close("avg", sim.average_temperature(id).unwrap(), 20.0, 1e-12);
            assert_eq!(sim.cumulative_energy(id), Some(0.0));
            assert_eq!(sim.peak_energy(id), Some(0.0));
        }
        assert_close("source", sim.source_temperature(), 100.0, 0.0);
        assert_close("sink", sim.sink_temperature(), 20.0, 0.0);
        assert_eq!(sim.tick_count(), 0);
    }
}

#[test]
fn reset_is_idempotent() {
    let mut once = three();
    once.step_n(30);
    once.reset();
    let mut twice = once.clone();
    twice.reset();
    assert_eq!(once, twice);
}

#[test]
fn reset_keeps_material_parameters() {
    let mut sim = single();
    sim.set_parameter(Parameter::Conductivity(0), "2.5").unwrap();
    sim.step_n(5);
    sim.reset();
    assert_close("k", sim.material(0).unwrap().conductivity(), 2.5, 0.0);
}

#[test]
fn garbage_conductivity_restores_default() {
    let mut sim = single();
    let outcome = sim.set_parameter(Parameter::Conductivity(0), "abc").unwrap();
    assert_eq!(outcome, ParameterOutcome::FellBack(0.5));
    assert_close("k", sim.material(0).unwrap().conductivity(), 0.5, 0.0);
    // 잘못된 입력 뒤에도 계속 진행 가능
    sim.step();
    assert!(sim.segment_temperatures(0).unwrap()[0] > 20.0);
}

#[test]
fn invalid_input_restores_per_material_default() {
    let mut sim = three();
    sim.set_parameter(Parameter::Conductivity(1), "4").unwrap();
    let outcome = sim.set_parameter(Parameter::Conductivity(1), "-3").unwrap();
    assert!(outcome.fell_back());
    assert_close("k2", sim.material(1).unwrap().conductivity(), 0.3, 0.0);
}

#[test]
fn non_positive_and_non_finite_inputs_fall_back() {
    let mut sim = single();
    for raw in ["0", "-5", "", "inf", "NaN", "   "] {
        let outcome = sim.set_parameter(Parameter::SourceTemperature, raw).unwrap();
        assert!(outcome.fell_back(), "{raw:?} should fall back");
        assert_close("source", sim.source_temperature(), 100.0, 0.0);
    }
    let outcome = sim.set_parameter(Parameter::Thickness(0), "0").unwrap();
    assert_eq!(outcome, ParameterOutcome::FellBack(0.1));
    let outcome = sim.set_parameter(Parameter::Area(0), "x").unwrap();
    assert_eq!(outcome, ParameterOutcome::FellBack(0.02));
}

#[test]
fn keep_current_policy_leaves_value_unchanged() {
    let mut sim = single().with_input_settings(InputUnits::default(), InvalidInputPolicy::KeepCurrent);
    sim.set_parameter(Parameter::Conductivity(0), "0.8").unwrap();
    let outcome = sim.set_parameter(Parameter::Conductivity(0), "abc").unwrap();
    assert_eq!(outcome, ParameterOutcome::FellBack(0.8));
    assert_close("k", sim.material(0).unwrap().conductivity(), 0.8, 0.0);
}

#[test]
fn leading_number_with_unit_suffix_uses_input_units() {
    let units = InputUnits {
        thickness: LengthUnit::Centimeter,
        area: AreaUnit::SquareCentimeter,
        temperature: TemperatureUnit::Fahrenheit,
        ..InputUnits::default()
    };
    let mut sim = single().with_input_settings(units, InvalidInputPolicy::RestoreDefault);

    let outcome = sim.set_parameter(Parameter::Thickness(0), "12 cm").unwrap();
    assert!(!outcome.fell_back());
    assert_close("L", sim.material(0).unwrap().thickness_m(), 0.12, 1e-12);

    sim.set_parameter(Parameter::Area(0), "200").unwrap();
    assert_close("A", sim.material(0).unwrap().area_m2(), 0.02, 1e-12);

    sim.set_parameter(Parameter::SourceTemperature, "212").unwrap();
    assert_close("source", sim.source_temperature(), 100.0, 1e-9);
}

#[test]
fn out_of_range_material_is_an_error() {
    let mut sim = single();
    let err = sim.set_parameter(Parameter::Conductivity(1), "1").unwrap_err();
    assert_eq!(err, ParameterError::NoSuchMaterial(2));
    assert_close("k", sim.material(0).unwrap().conductivity(), 0.5, 0.0);
    assert!(sim.material(1).is_none());
    assert!(sim.average_temperature(3).is_none());
}

#[test]
fn parameter_names_parse_one_based() {
    assert_eq!("k:2".parse::<Parameter>().unwrap(), Parameter::Conductivity(1));
    assert_eq!("thickness".parse::<Parameter>().unwrap(), Parameter::Thickness(0));
    assert_eq!("source".parse::<Parameter>().unwrap(), Parameter::SourceTemperature);
    assert!("k:0".parse::<Parameter>().is_err());
    assert!("pressure".parse::<Parameter>().is_err());
    assert_eq!(Parameter::Area(2).to_string(), "area:3");
}

#[test]
fn source_below_sink_does_not_panic() {
    let mut sim = single();
    sim.set_parameter(Parameter::SourceTemperature, "10").unwrap();
    sim.step_n(3);
    for t in sim.segment_temperatures(0).unwrap() {
        assert_close("seg", *t, 10.0, 1e-12);
    }
}

#[test]
fn energy_statistics_accumulate() {
    let mut sim = single();
    sim.step();
    let m = sim.material(0).unwrap();
    assert!(m.instantaneous_energy() > 0.8);
    assert_close("cum", m.cumulative_energy(), m.instantaneous_energy(), 1e-12);
    assert_close("peak", m.peak_energy(), m.instantaneous_energy(), 1e-12);

    let mut total = m.cumulative_energy();
    let mut previous_cum = total;
    for _ in 0..100 {
        sim.step();
        let m = sim.material(0).unwrap();
        total += m.instantaneous_energy();
        assert!(m.cumulative_energy() >= previous_cum);
        assert!(m.peak_energy() >= m.instantaneous_energy());
        previous_cum = m.cumulative_energy();
    }
    assert_close("sum", sim.cumulative_energy(0).unwrap(), total, 1e-9);
}

#[test]
fn flux_limit_caps_large_gradients() {
    let mut sim = single();
    sim.set_parameter(Parameter::Conductivity(0), "205").unwrap();
    sim.set_parameter(Parameter::SourceTemperature, "500").unwrap();
    sim.step();
    // 205·0.02·480/0.1 = 19680 W → 1000 W로 제한
    let expected = 20.0 + 1000.0 * 0.1 / (0.02 * 0.1 * 1000.0);
    assert_close("seg0", sim.segment_temperatures(0).unwrap()[0], expected, 1e-9);
}

#[test]
fn table_energy_differs_from_flux_energy() {
    let mut sim = single();
    sim.step_n(3);
    let m = sim.material(0).unwrap();
    let manual: f64 = m
        .segments()
        .windows(2)
        .map(|w| (w[1] - w[0]).abs() * 0.5 * 0.01)
        .sum();
    assert_close("table", table_energy(m), manual, 1e-12);
    assert!((table_energy(m) - m.instantaneous_energy()).abs() > 1e-6);
}

#[test]
fn summary_rows_list_source_materials_sink() {
    let mut sim = three();
    sim.step();
    let rows = summary_rows(&sim);
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].element, Element::Source);
    assert_eq!(rows[4].element, Element::Sink);
    assert_close("source", rows[0].temperature_c, 100.0, 0.0);
    assert!(rows[0].conductivity.is_none());
    match &rows[2].element {
        Element::Material { index, label } => {
            assert_eq!(*index, 1);
            assert_eq!(label, "Material 2");
        }
        other => panic!("unexpected element {other:?}"),
    }
    assert_eq!(rows[2].conductivity, Some(0.3));
}

#[test]
fn three_material_layout_uses_chain_presets() {
    let sim = three();
    let k: Vec<f64> = sim.materials().iter().map(|m| m.conductivity()).collect();
    assert_eq!(k, vec![0.5, 0.3, 0.7]);
}

#[test]
fn flux_coupled_sink_warms_up() {
    let config = StepperConfig {
        sink_coupling: SinkCoupling::FluxCoupled,
        ..StepperConfig::default()
    };
    let mut sim = Simulation::new(config, MaterialLayout::ThreeMaterial);
    for i in 0..sim.material_count() {
        sim.set_parameter(Parameter::Conductivity(i), "50").unwrap();
    }
    sim.step_n(200);
    let sink = sim.sink_temperature();
    assert!(sink > 20.0 + 1e-6, "sink did not warm: {sink}");
    assert!(sink < sim.source_temperature());
}

#[test]
fn follow_last_segment_sink_tracks_mean_of_last_segments() {
    let mut sim = three();
    for i in 0..sim.material_count() {
        sim.set_parameter(Parameter::Conductivity(i), "50").unwrap();
    }
    sim.step_n(100);
    let mean = (0..3)
        .map(|i| *sim.segment_temperatures(i).unwrap().last().unwrap())
        .sum::<f64>()
        / 3.0;
    assert_close("sink", sim.sink_temperature(), mean, 1e-9);
}

#[test]
fn vanishing_heat_capacity_falls_back() {
    let config = StepperConfig {
        sink_coupling: SinkCoupling::FluxCoupled,
        ..StepperConfig::default()
    };
    let mut sim = Simulation::new(config, MaterialLayout::Single);
    sim.set_parameter(Parameter::Area(0), "1e-200").unwrap();
    let outcome = sim.set_parameter(Parameter::Thickness(0), "1e-200").unwrap();
    assert_eq!(outcome, ParameterOutcome::FellBack(0.1));

    let outcome = sim.set_parameter(Parameter::Area(0), "1e-320").unwrap();
    assert!(outcome.fell_back());

    for _ in 0..20 {
        sim.step();
        assert!(sim.sink_temperature().is_finite(), "sink {}", sim.sink_temperature());
        for t in sim.segment_temperatures(0).unwrap() {
            assert!(t.is_finite());
        }
    }
}

#[test]
fn overflowing_conductance_falls_back() {
    let mut sim = single();
    sim.set_parameter(Parameter::Thickness(0), "1e-300").unwrap();
    let outcome = sim.set_parameter(Parameter::Conductivity(0), "1e300").unwrap();
    assert_eq!(outcome, ParameterOutcome::FellBack(0.5));
}

fn unclamped_unlimited() -> Simulation {
    let config = StepperConfig {
        clamp_to_boundaries: false,
        flux_limit: None,
        ..StepperConfig::default()
    };
    Simulation::new(config, MaterialLayout::Single)
}

#[test]
fn unclamped_first_step_matches_golden() {
    let mut sim = unclamped_unlimited();
    sim.step();
    assert_close("seg0", sim.segment_temperatures(0).unwrap()[0], 20.4, 1e-9);
}

#[test]
fn unclamped_sink_equals_last_segment() {
    let mut sim = unclamped_unlimited();
    sim.set_parameter(Parameter::Conductivity(0), "50").unwrap();
    for _ in 0..30 {
        sim.step();
        let last = *sim.segment_temperatures(0).unwrap().last().unwrap();
        assert_eq!(sim.sink_temperature(), last);
    }
}

#[test]
fn unclamped_sink_can_fall() {
    let mut sim = unclamped_unlimited();
    sim.set_parameter(Parameter::Conductivity(0), "50").unwrap();
    sim.step_n(100);
    let warmed = sim.sink_temperature();
    assert!(warmed > 20.0);

    sim.set_parameter(Parameter::SourceTemperature, "1").unwrap();
    sim.step_n(50);
    assert!(
        sim.sink_temperature() < warmed,
        "sink {} did not drop below {warmed}",
        sim.sink_temperature()
    );
}

#[test]
fn unlimited_flux_overshoots_source() {
    let mut sim = unclamped_unlimited();
    sim.set_parameter(Parameter::Conductivity(0), "205").unwrap();
    sim.set_parameter(Parameter::SourceTemperature, "500").unwrap();
    sim.step();
    let flux = 205.0 * 0.02 * (500.0 - 20.0) / 0.1;
    let expected = 20.0 + flux * 0.1 / (0.02 * 0.1 * 1000.0);
    let seg0 = sim.segment_temperatures(0).unwrap()[0];
    assert_close("seg0", seg0, expected, 1e-9);
    assert!(seg0 > sim.source_temperature());
}
