//! End-to-end allocation properties, driven through the JSON wire form.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

use u_timetable::models::OutcomeStatus;
use u_timetable::validation::ValidationErrorKind;
use u_timetable::{
    audit_schedule, Allocator, AllocatorConfig, ScheduleError, ScheduleKpi, ScheduleRequest,
    Strategy,
};

/// A random but well-formed request: 2-5 teachers, 2-6 courses, 1-3 rooms.
fn random_request(rng: &mut StdRng) -> Value {
    let course_count = rng.random_range(2..=6);
    let courses: Vec<Value> = (0..course_count)
        .map(|c| {
            let duration = [30, 45, 60, 90][rng.random_range(0..4usize)];
            json!({
                "id": format!("c{c}"),
                "name": format!("Course {c}"),
                "duration": duration,
            })
        })
        .collect();

    let teacher_count = rng.random_range(2..=5);
    let teachers: Vec<Value> = (0..teacher_count)
        .map(|t| {
            let skills: Vec<String> = (0..course_count)
                .filter(|_| rng.random_bool(0.5))
                .map(|c| format!("c{c}"))
                .collect();
            let windows: Vec<Value> = (0..rng.random_range(1..=4))
                .map(|_| {
                    let start = rng.random_range(8..18);
                    let len = rng.random_range(1..=3);
                    json!({
                        "day_of_week": rng.random_range(1..=7),
                        "start_time": format!("{start:02}:00:00"),
                        "end_time": format!("{:02}:00", start + len),
                    })
                })
                .collect();
            json!({
                "id": format!("t{t}"),
                "name": format!("Teacher {t}"),
                "skills": skills,
                "availability": windows,
            })
        })
        .collect();

    let rooms: Vec<Value> = (0..rng.random_range(1..=3))
        .map(|r| json!({ "id": format!("r{r}"), "name": format!("Room {r}") }))
        .collect();

    json!({
        "base_id": "base-1",
        "start_date": "2025-11-24",
        "teachers": teachers,
        "courses": courses,
        "rooms": rooms,
        "density": rng.random_range(1..=3),
        "utc_offset_minutes": 540,
    })
}

fn parse(value: &Value) -> ScheduleRequest {
    ScheduleRequest::from_json(&value.to_string()).unwrap()
}

#[test]
fn random_requests_pass_audit() {
    let mut source = StdRng::seed_from_u64(2025);
    for round in 0..200 {
        let request = parse(&random_request(&mut source));
        for strategy in [Strategy::FirstFit, Strategy::Exhaustive { node_budget: 2_000 }] {
            let result = Allocator::new()
                .with_strategy(strategy)
                .with_seed(round)
                .allocate(&request)
                .unwrap();

            let violations = audit_schedule(&request, &result.results);
            assert!(violations.is_empty(), "round {round}: {violations:?}");
            assert_eq!(result.total, result.results.len());
            assert_eq!(result.outcomes.len(), request.courses.len());
            for outcome in &result.outcomes {
                assert!(outcome.placed <= request.density);
            }
        }
    }
}

#[test]
fn exhaustive_never_places_fewer() {
    let mut source = StdRng::seed_from_u64(77);
    for round in 0..50 {
        let request = parse(&random_request(&mut source));
        let greedy = Allocator::new().with_seed(round).allocate(&request).unwrap();
        let exact = Allocator::new()
            .with_strategy(Strategy::Exhaustive { node_budget: 2_000 })
            .with_seed(round)
            .allocate(&request)
            .unwrap();
        assert!(exact.total >= greedy.total, "round {round}");
    }
}

#[test]
fn same_seed_same_result() {
    let mut source = StdRng::seed_from_u64(5);
    let request = parse(&random_request(&mut source));
    let config = AllocatorConfig::from_json(r#"{"seed": 99}"#).unwrap();

    let a = Allocator::with_config(config.clone()).allocate(&request).unwrap();
    let b = Allocator::with_config(config).allocate(&request).unwrap();
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}

#[test]
fn scenario_single_class() {
    let request = parse(&json!({
        "base_id": "b",
        "start_date": "2025-11-24",
        "teachers": [{
            "id": "t1", "name": "Ana", "skills": ["c1"],
            "availability": [{"day_of_week": 1, "start_time": "09:00", "end_time": "11:00"}]
        }],
        "courses": [{"id": "c1", "name": "Robotics", "duration": 60}],
        "rooms": [{"id": "r1", "name": "Lab", "capacity": 8}],
        "density": 1,
        "utc_offset_minutes": 540
    }));

    let result = Allocator::new().with_seed(0).allocate(&request).unwrap();
    let out: Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();

    assert_eq!(out["status"], "complete");
    assert_eq!(out["total"], 1);
    assert_eq!(out["warnings"], json!([]));
    let class = &out["results"][0];
    assert_eq!(class["course_id"], "c1");
    assert_eq!(class["teacher_id"], "t1");
    assert_eq!(class["room_id"], "r1");
    assert_eq!(class["start_time"], "2025-11-24T09:00:00+09:00");
    assert_eq!(class["end_time"], "2025-11-24T10:00:00+09:00");
}

#[test]
fn scenario_no_qualified_teacher() {
    let request = parse(&json!({
        "start_date": "2025-11-24",
        "teachers": [{
            "id": "t1", "skills": ["c1"],
            "availability": [{"day_of_week": 1, "start_time": "09:00", "end_time": "11:00"}]
        }],
        "courses": [{"id": "c9", "name": "Ceramics", "duration": 60}],
        "rooms": [{"id": "r1"}]
    }));

    let result = Allocator::new().with_seed(0).allocate(&request).unwrap();
    assert_eq!(result.total, 0);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].to_string().contains("Ceramics"));
    assert_eq!(result.outcomes[0].status, OutcomeStatus::NoQualifiedTeacher);
}

#[test]
fn scenario_shared_teacher() {
    let request = parse(&json!({
        "start_date": "2025-11-24",
        "teachers": [{
            "id": "t1", "skills": ["c1", "c2"],
            "availability": [{"day_of_week": 3, "start_time": "09:00", "end_time": "10:00"}]
        }],
        "courses": [
            {"id": "c1", "duration": 60},
            {"id": "c2", "duration": 60}
        ],
        "rooms": [{"id": "r1"}, {"id": "r2"}],
        "density": 1
    }));

    for seed in 0..10 {
        let result = Allocator::new().with_seed(seed).allocate(&request).unwrap();
        assert_eq!(result.total, 1);
        assert!(audit_schedule(&request, &result.results).is_empty());
        let unplaced: Vec<&str> = result
            .outcomes
            .iter()
            .filter(|o| o.placed == 0)
            .map(|o| o.course_id.as_str())
            .collect();
        assert_eq!(unplaced, vec!["c2"]);
    }
}

#[test]
fn scenario_window_too_short() {
    let request = parse(&json!({
        "start_date": "2025-11-24",
        "teachers": [{
            "id": "t1", "skills": ["c1"],
            "availability": [{"day_of_week": 1, "start_time": "09:00", "end_time": "09:30"}]
        }],
        "courses": [{"id": "c1", "duration": 60}],
        "rooms": [{"id": "r1"}],
        "density": 1
    }));

    let result = Allocator::new().with_seed(0).allocate(&request).unwrap();
    assert_eq!(result.total, 0);
    assert_eq!(result.outcomes[0].status, OutcomeStatus::Unplaced);

    let kpi = ScheduleKpi::calculate(&request, &result);
    assert_eq!(kpi.requested_sessions, 1);
    assert_eq!(kpi.placed_sessions, 0);
}

#[test]
fn malformed_payload_rejected() {
    let err = ScheduleRequest::from_json(
        r#"{"start_date": "2025-11-24", "teachers": [{"id": "t1",
            "availability": [{"day_of_week": 1, "start_time": "9am", "end_time": "10:00"}]}]}"#,
    )
    .unwrap_err();
    assert!(matches!(err, ScheduleError::MalformedPayload(_)));

    let err = ScheduleRequest::from_json(r#"{"start_date": "24/11/2025"}"#).unwrap_err();
    assert!(matches!(err, ScheduleError::MalformedPayload(_)));
}

#[test]
fn invalid_request_rejected_before_allocation() {
    let request = parse(&json!({
        "start_date": "2025-11-24",
        "teachers": [{
            "id": "t1", "skills": ["c1"],
            "availability": [{"day_of_week": 8, "start_time": "11:00", "end_time": "09:00"}]
        }],
        "courses": [{"id": "c1", "duration": 0}],
        "rooms": [{"id": "r1"}, {"id": "r1"}],
        "density": 0
    }));

    let err = Allocator::new().with_seed(0).allocate(&request).unwrap_err();
    let ScheduleError::InvalidRequest(errors) = err else {
        panic!("expected InvalidRequest");
    };
    assert!(errors.len() >= 5, "{errors:?}");
}

#[test]
fn out_of_range_days_reported_by_validation() {
    let request = parse(&json!({
        "start_date": "2025-11-24",
        "teachers": [{
            "id": "t1", "skills": ["c1"],
            "availability": [
                {"day_of_week": -1, "start_time": "09:00", "end_time": "10:00"},
                {"day_of_week": 300, "start_time": "09:00", "end_time": "10:00"}
            ]
        }],
        "courses": [{"id": "c1", "duration": 60}],
        "rooms": [{"id": "r1"}],
        "density": 1
    }));

    let err = Allocator::new().with_seed(0).allocate(&request).unwrap_err();
    let ScheduleError::InvalidRequest(errors) = err else {
        panic!("expected InvalidRequest");
    };
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e.kind == ValidationErrorKind::InvalidDayOfWeek));
}

#[test]
fn huge_density_answers_with_partial_result() {
    let request = parse(&json!({
        "start_date": "2025-11-24",
        "teachers": [{
            "id": "t1", "skills": ["c1"],
            "availability": [{"day_of_week": 1, "start_time": "09:00", "end_time": "10:00"}]
        }],
        "courses": [{"id": "c1", "duration": 60}],
        "rooms": [{"id": "r1"}],
        "density": u32::MAX
    }));

    let result = Allocator::new().with_seed(1).allocate(&request).unwrap();
    assert_eq!(result.total, 1);
    assert!(!result.is_complete());
    let kpi = ScheduleKpi::calculate(&request, &result);
    assert_eq!(kpi.placed_sessions, 1);
}
