//! Contract tests for the TypedArray iterator protocol
//!
//! These tests drive `values()` / `next()` the way script code does and check
//! the observable `{ value, done }` sequence for every element kind.

use builtins::{
    ArrayIteratorPrototype, BigIntValue, DetachPolicy, ErrorKind, IteratorResult, IteratorState,
    JsValue, TypedArray, TypedArrayKind, TypedArrayPrototype, TypedArrayValue,
};
use pretty_assertions::assert_eq;

fn from_30_40_50(kind: TypedArrayKind) -> TypedArray {
    let values = [30i64, 40, 50]
        .into_iter()
        .map(|n| {
            if kind.is_bigint() {
                TypedArrayValue::from_bigint(n)
            } else {
                TypedArrayValue::from_number(n as f64)
            }
        })
        .collect();
    TypedArray::from_values(kind, values).unwrap()
}

fn expected(kind: TypedArrayKind, n: i64) -> IteratorResult {
    if kind.is_bigint() {
        IteratorResult::value(JsValue::bigint(BigIntValue::from(n)))
    } else {
        IteratorResult::value(JsValue::number(n as f64))
    }
}

#[test]
fn contract_values_length_is_zero() {
    let values = TypedArrayPrototype::method("values").unwrap();
    assert_eq!(values.name, "values");
    assert_eq!(values.length, 0);
}

#[test]
fn contract_keys_and_entries_length_is_zero() {
    for name in ["keys", "entries"] {
        assert_eq!(TypedArrayPrototype::method(name).unwrap().length, 0, "{}", name);
    }
    assert_eq!(ArrayIteratorPrototype::NEXT.length, 0);
}

#[test]
fn contract_basic_functionality_every_kind() {
    for kind in TypedArrayKind::ALL {
        let a = from_30_40_50(kind);
        let mut it = a.values();
        assert_eq!(it.next().unwrap(), expected(kind, 30), "{}", kind.name());
        assert_eq!(it.next().unwrap(), expected(kind, 40), "{}", kind.name());
        assert_eq!(it.next().unwrap(), expected(kind, 50), "{}", kind.name());
        assert_eq!(it.next().unwrap(), IteratorResult::done(), "{}", kind.name());
        assert_eq!(it.next().unwrap(), IteratorResult::done(), "{}", kind.name());
        assert_eq!(it.next().unwrap(), IteratorResult::done(), "{}", kind.name());
    }
}

#[test]
fn contract_boundary_values_every_kind() {
    let numbers = |values: &[f64]| -> Vec<TypedArrayValue> {
        values.iter().map(|&n| TypedArrayValue::from_number(n)).collect()
    };
    let cases: Vec<(TypedArrayKind, Vec<TypedArrayValue>)> = vec![
        (TypedArrayKind::Int8, numbers(&[-128.0, 127.0])),
        (TypedArrayKind::Uint8, numbers(&[0.0, 255.0])),
        (TypedArrayKind::Int16, numbers(&[-32768.0, 32767.0])),
        (TypedArrayKind::Uint16, numbers(&[0.0, 65535.0])),
        (TypedArrayKind::Int32, numbers(&[-2147483648.0, 2147483647.0])),
        (TypedArrayKind::Uint32, numbers(&[0.0, 4294967295.0])),
        (TypedArrayKind::Float32, numbers(&[f64::NEG_INFINITY, f32::MAX as f64])),
        (TypedArrayKind::Float64, numbers(&[f64::MIN_POSITIVE, f64::MAX])),
        (
            TypedArrayKind::BigInt64,
            vec![
                TypedArrayValue::from_bigint(i64::MIN),
                TypedArrayValue::from_bigint(i64::MAX),
            ],
        ),
        (
            TypedArrayKind::BigUint64,
            vec![
                TypedArrayValue::from_bigint(0u64),
                TypedArrayValue::from_bigint(u64::MAX),
            ],
        ),
    ];
    assert_eq!(cases.len(), TypedArrayKind::ALL.len());

    for (kind, values) in cases {
        let a = TypedArray::from_values(kind, values.clone()).unwrap();
        let mut it = a.values();
        for value in values {
            assert_eq!(
                it.next().unwrap(),
                IteratorResult::value(value.into()),
                "{}",
                kind.name()
            );
        }
        assert_eq!(it.next().unwrap(), IteratorResult::done(), "{}", kind.name());
    }
}

#[test]
fn contract_iterator_over_temporary_view() {
    for kind in TypedArrayKind::ALL {
        let mut it = from_30_40_50(kind).values();
        assert_eq!(it.next().unwrap(), expected(kind, 30), "{}", kind.name());
        assert_eq!(it.next().unwrap(), expected(kind, 40), "{}", kind.name());
        assert_eq!(it.next().unwrap(), expected(kind, 50), "{}", kind.name());
        assert_eq!(it.next().unwrap(), IteratorResult::done(), "{}", kind.name());
    }
}

#[test]
fn contract_uint8_scenario() {
    let a = from_30_40_50(TypedArrayKind::Uint8);
    let mut it = a.values();
    let results: Vec<IteratorResult> = (0..5).map(|_| it.next().unwrap()).collect();
    assert_eq!(
        results,
        vec![
            IteratorResult::value(JsValue::number(30.0)),
            IteratorResult::value(JsValue::number(40.0)),
            IteratorResult::value(JsValue::number(50.0)),
            IteratorResult::done(),
            IteratorResult::done(),
        ]
    );
}

#[test]
fn contract_big_uint64_scenario() {
    let a = from_30_40_50(TypedArrayKind::BigUint64);
    let mut it = a.values();
    for n in [30u64, 40, 50] {
        let result = it.next().unwrap();
        assert!(!result.done);
        assert!(result.value.is_bigint(), "BigUint64Array yields BigInts");
        assert_eq!(result.value, JsValue::bigint(BigIntValue::from(n)));
    }
    for _ in 0..3 {
        assert_eq!(it.next().unwrap(), IteratorResult::done());
    }
}

#[test]
fn contract_big_values_above_2_pow_53_are_exact() {
    let big = u64::MAX - 1;
    let a = TypedArray::from_values(
        TypedArrayKind::BigUint64,
        vec![TypedArrayValue::from_bigint(big)],
    )
    .unwrap();
    let mut it = a.values();
    assert_eq!(
        it.next().unwrap().value.as_bigint().unwrap().to_string(),
        "18446744073709551614n"
    );
}

#[test]
fn contract_terminal_state_is_idempotent() {
    let a = from_30_40_50(TypedArrayKind::Float64);
    let mut it = a.values();
    while !it.next().unwrap().done {}
    let index = it.index();
    for _ in 0..10 {
        assert_eq!(it.next().unwrap(), IteratorResult::done());
        assert_eq!(it.state(), IteratorState::Exhausted);
        assert_eq!(it.index(), index);
    }
}

#[test]
fn contract_detach_before_third_step() {
    for kind in TypedArrayKind::ALL {
        let a = from_30_40_50(kind);
        let mut it = a.values();
        assert_eq!(it.next().unwrap(), expected(kind, 30));
        assert_eq!(it.next().unwrap(), expected(kind, 40));
        a.buffer().detach();
        assert_eq!(it.next().unwrap(), IteratorResult::done(), "{}", kind.name());
        assert_eq!(it.next().unwrap(), IteratorResult::done(), "{}", kind.name());
    }
}

#[test]
fn contract_detach_before_first_step() {
    let a = from_30_40_50(TypedArrayKind::Int16);
    let mut it = a.values();
    a.buffer().detach();
    assert_eq!(it.next().unwrap(), IteratorResult::done());
}

#[test]
fn contract_detach_under_throw_policy() {
    let a = from_30_40_50(TypedArrayKind::Uint32);
    let mut it = a.values_with_policy(DetachPolicy::Throw);
    assert_eq!(it.next().unwrap(), expected(TypedArrayKind::Uint32, 30));
    a.buffer().detach();
    assert_eq!(it.next().unwrap_err().kind, ErrorKind::TypeError);
    assert_eq!(it.next().unwrap(), IteratorResult::done());
}

#[test]
fn contract_keys_and_entries() {
    let a = from_30_40_50(TypedArrayKind::Int8);

    let mut keys = a.keys();
    for i in 0..3 {
        assert_eq!(keys.next().unwrap(), IteratorResult::value(JsValue::number(i as f64)));
    }
    assert_eq!(keys.next().unwrap(), IteratorResult::done());

    let mut entries = a.entries();
    assert_eq!(
        entries.next().unwrap(),
        IteratorResult::value(JsValue::array_from(vec![
            JsValue::number(0.0),
            JsValue::number(30.0)
        ]))
    );
}

#[test]
fn contract_iterator_via_method_table() {
    let a = from_30_40_50(TypedArrayKind::Uint16);
    let mut it = TypedArrayPrototype::method("values").unwrap().call(&a);
    assert_eq!(
        ArrayIteratorPrototype::NEXT.call(&mut it).unwrap(),
        expected(TypedArrayKind::Uint16, 30)
    );
}
