use super::*;

#[test]
fn names_roundtrip_through_from_str() {
    for key in ParamKey::ALL {
        assert_eq!(key.name().parse::<ParamKey>().unwrap(), key);
        assert_eq!(key.to_string(), key.name());
    }
    assert!("headWidth".parse::<ParamKey>().is_err());
}

#[test]
fn grid_keys_are_split_from_key_params() {
    let inputs = TargetInputs::new()
        .with(ParamKey::Rows, 3.0)
        .with(ParamKey::HeadW, 200.0)
        .with(ParamKey::Cols, 8.0);
    let keys: Vec<_> = inputs.key_params().map(|(k, _)| k).collect();
    assert_eq!(keys, vec![ParamKey::HeadW]);
    assert!(ParamKey::KEY_PARAMS.iter().all(|k| !k.is_grid()));
}

#[test]
fn clamp_input_uses_slider_bounds() {
    assert_eq!(ParamKey::HeadW.clamp_input(10.0, 12), 70.0);
    assert_eq!(ParamKey::HeadH.clamp_input(400.0, 12), 325.0);
    assert_eq!(ParamKey::Roundness.clamp_input(0.5, 12), 0.5);
    assert_eq!(ParamKey::ColorIndex.clamp_input(3.6, 12), 4.0);
    assert_eq!(ParamKey::ColorIndex.clamp_input(99.0, 12), 11.0);
    assert_eq!(ParamKey::Cols.clamp_input(2.0, 12), 6.0);
    assert_eq!(ParamKey::Rows.clamp_input(f64::NAN, 12), 1.0);
}

#[test]
fn from_pairs_rejects_unknown_names() {
    let ok = TargetInputs::from_pairs([("toothExtra", 20.0), ("cols", 7.0)]).unwrap();
    assert_eq!(ok.get(ParamKey::ToothExtra), Some(20.0));
    assert_eq!(ok.get(ParamKey::Cols), Some(7.0));
    assert!(TargetInputs::from_pairs([("bogus", 1.0)]).is_err());
}

#[test]
fn json_uses_parameter_names() {
    let inputs: TargetInputs = serde_json::from_str(r#"{"headW": 180, "rows": 4}"#).unwrap();
    assert_eq!(inputs.get(ParamKey::HeadW), Some(180.0));
    assert_eq!(inputs.get(ParamKey::Rows), Some(4.0));
    let s = serde_json::to_string(&inputs).unwrap();
    assert!(s.contains("\"headW\""));
}

#[test]
fn target_inputs_act_as_a_static_source() {
    let mut src = TargetInputs::new().with(ParamKey::Roundness, 0.3);
    let polled = src.poll();
    assert_eq!(polled.get(ParamKey::Roundness), Some(0.3));
    assert_eq!(src.poll(), polled);
}
