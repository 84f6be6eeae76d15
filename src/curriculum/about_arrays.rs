//! Arrays, slices, vectors and the collections that behave like stacks and queues.

use std::collections::VecDeque;

use koans_core::assert::{expect_eq, expect_none, expect_panics, expect_some, expect_true};
use koans_core::{CheckResult, KoanDeclaration, koan};

pub const GROUP: &str = "Arrays";

pub fn koans() -> Vec<KoanDeclaration> {
    vec![
        koan!(GROUP, 1, creating_arrays),
        koan!(GROUP, 2, array_literals),
        koan!(GROUP, 3, accessing_array_elements),
        koan!(GROUP, 4, slicing_arrays),
        koan!(GROUP, 5, pushing_and_popping),
        koan!(GROUP, 6, shifting),
    ]
}

fn creating_arrays() -> CheckResult {
    let empty_array: [i32; 0] = [];
    expect_eq(0, empty_array.len())?;
    expect_true(empty_array.is_empty(), "a zero-length array to be empty")?;

    // An array coerces to a slice of the same element type.
    let as_slice: &[i32] = &empty_array;
    expect_eq(0, as_slice.len())
}

fn array_literals() -> CheckResult {
    let array = [42];
    expect_eq(1, array.len())?;
    expect_eq([42], array)?;

    // Arrays are 0-based.
    expect_eq(42, array[0])?;

    // The length is part of the type, so the array cannot grow.
    expect_none(array.get(1), "a second element")?;
    let mut fixed = vec![42].into_boxed_slice();
    expect_panics(move || fixed[1] = 13, "writing past the end of a boxed slice")?;

    // A Vec is the growable counterpart.
    let mut dynamic = Vec::new();
    dynamic.push(42);
    expect_eq(&array[..], &dynamic[..])?;

    dynamic.push(13);
    expect_eq(vec![42, 13], dynamic)
}

fn accessing_array_elements() -> CheckResult {
    let array = ["peanut", "butter", "and", "jelly"];

    expect_eq("peanut", array[0])?;
    expect_eq("jelly", array[3])?;

    // There is no negative indexing; ask for the last element instead.
    expect_eq("jelly", *expect_some(array.last(), "a last element")?)?;
    expect_eq(Some(&"and"), array.iter().rev().nth(1))
}

fn slicing_arrays() -> CheckResult {
    let array = ["peanut", "butter", "and", "jelly"];

    expect_eq(&["peanut", "butter"][..], &array[..2])?;
    expect_eq(&["butter", "and"][..], &array[1..3])?;
    expect_eq(&["and", "jelly"][..], &array[2..])?;
    expect_true(array[4..].is_empty(), "a slice starting at the end to be empty")?;

    // Iterator adapters give the same view without indices.
    let taken: Vec<_> = array.iter().skip(1).take(2).copied().collect();
    expect_eq(vec!["butter", "and"], taken)
}

fn pushing_and_popping() -> CheckResult {
    let mut stack = vec![1, 2];
    stack.push(3);

    // The top of the stack is the end of the Vec; list it top-first.
    let top_first: Vec<_> = stack.iter().rev().copied().collect();
    expect_eq(vec![3, 2, 1], top_first)?;

    let popped = stack.pop();
    expect_eq(Some(3), popped)?;
    expect_eq(vec![1, 2], stack.clone())?;

    stack.clear();
    expect_eq(None, stack.pop())
}

fn shifting() -> CheckResult {
    let mut list: VecDeque<&str> = VecDeque::from(["Hello", "World"]);

    // unshift
    list.push_front("Say");
    expect_eq(vec!["Say", "Hello", "World"], Vec::from(list.clone()))?;

    list.pop_back();
    expect_eq(vec!["Say", "Hello"], Vec::from(list.clone()))?;

    // shift
    let shifted = list.pop_front();
    expect_eq(Some("Say"), shifted)?;
    expect_eq(vec!["Hello"], Vec::from(list.clone()))?;

    let hello = expect_some(list.iter().position(|w| *w == "Hello"), "\"Hello\" in the list")?;
    list.insert(hello + 1, "World");
    expect_eq(vec!["Hello", "World"], Vec::from(list))
}
