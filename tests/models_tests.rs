// Model serde and conversion tests

use hall_of_shame::models::*;

#[test]
fn instance_state_from_cf_is_case_insensitive() {
    assert_eq!(InstanceState::from_cf("RUNNING"), InstanceState::Running);
    assert_eq!(InstanceState::from_cf("running"), InstanceState::Running);
    assert_eq!(InstanceState::from_cf("CRASHED"), InstanceState::Crashed);
    assert_eq!(InstanceState::from_cf("DOWN"), InstanceState::Down);
    assert_eq!(InstanceState::from_cf("STARTING"), InstanceState::Starting);
    assert_eq!(InstanceState::from_cf("EVACUATING"), InstanceState::Unknown);
}

#[test]
fn app_instance_stat_missing_state_defaults_to_unknown() {
    let stat: AppInstanceStat =
        serde_json::from_str(r#"{"stats":{"mem_quota":10,"usage":{"mem":5}}}"#).unwrap();
    let rt = InstanceRuntimeStat::from(&stat);
    assert_eq!(rt.state, InstanceState::Unknown);
    assert_eq!(rt.memory_quota_bytes, 10);
    assert_eq!(rt.memory_usage_bytes, 5);
}

#[test]
fn app_instance_stat_lowercase_state_is_recognised() {
    let stat: AppInstanceStat = serde_json::from_str(r#"{"state":"running"}"#).unwrap();
    assert_eq!(InstanceRuntimeStat::from(&stat).state, InstanceState::Running);
}

#[test]
fn app_instance_stat_tolerates_null_wire_fields() {
    let stat: AppInstanceStat = serde_json::from_str(
        r#"{"state":"RUNNING","stats":{"port":null,"uris":null,"mem_quota":600,"usage":{"cpu":null,"mem":100}}}"#,
    )
    .unwrap();
    let rt = InstanceRuntimeStat::from(&stat);
    assert_eq!(rt.state, InstanceState::Running);
    assert_eq!(rt.memory_quota_bytes, 600);
    assert_eq!(rt.memory_usage_bytes, 100);
}

#[test]
fn workload_descriptor_from_search_resource() {
    let resource: AppSearchResource = serde_json::from_str(
        r#"{
            "metadata": {"guid": "abc", "url": "/v2/apps/abc"},
            "entity": {"name": "billing", "instances": 4, "space_guid": "space-1", "memory": 1024}
        }"#,
    )
    .unwrap();
    let w = WorkloadDescriptor::from(resource);
    assert_eq!(
        w,
        WorkloadDescriptor {
            guid: "abc".into(),
            name: "billing".into(),
            space_guid: "space-1".into(),
            instances: 4,
        }
    );
}

#[test]
fn workload_descriptor_null_fields_become_zero_values() {
    let resource: AppSearchResource = serde_json::from_str(
        r#"{"metadata": {"guid": "abc"}, "entity": {"name": null, "instances": null, "space_guid": null}}"#,
    )
    .unwrap();
    let w = WorkloadDescriptor::from(resource);
    assert_eq!(w.guid, "abc");
    assert_eq!(w.name, "");
    assert_eq!(w.instances, 0);
}

#[test]
fn summary_table_row_matches_headers() {
    let s = WorkloadUsageSummary {
        name: "billing".into(),
        guid: "abc".into(),
        space_guid: "space-1".into(),
        instances: 3,
        memory_alloc_bytes: 1073741824,
        avg_memory_use_bytes: 134217728,
        ratio: 8.0,
    };
    let row = s.table_row();
    assert_eq!(row.len(), TABLE_HEADERS.len());
    assert_eq!(
        row,
        vec!["billing", "space-1", "1073741824", "134217728", "8.000000"]
    );
}

#[test]
fn summary_ratio_formats_with_six_decimals() {
    let s = WorkloadUsageSummary {
        name: "n".into(),
        guid: "g".into(),
        space_guid: "s".into(),
        instances: 1,
        memory_alloc_bytes: 1000,
        avg_memory_use_bytes: 300,
        ratio: 1000.0 / 300.0,
    };
    assert_eq!(s.table_row()[4], "3.333333");
}
