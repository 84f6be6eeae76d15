//! Shared behavior without class inheritance: traits, default methods, overriding and shadowing.
//!
//! The fixtures below are independent types. What a "subclass" would inherit comes from a trait's
//! default methods; what it would add is an inherent method; "hiding" a method is an inherent method on
//! a wrapper type.

use std::any::Any;

use koans_core::assert::{expect_eq, expect_true};
use koans_core::{CheckResult, KoanDeclaration, koan};

pub const GROUP: &str = "Inheritance";

pub fn koans() -> Vec<KoanDeclaration> {
    vec![
        koan!(GROUP, 1, implementors_can_stand_in_for_the_trait),
        koan!(GROUP, 2, every_static_type_is_any),
        koan!(GROUP, 3, implementors_share_default_behavior),
        koan!(GROUP, 4, implementors_add_new_behavior),
        koan!(GROUP, 5, implementors_can_override_default_behavior),
        koan!(GROUP, 6, wrappers_can_shadow_methods),
        koan!(GROUP, 7, shadowing_does_not_change_the_wrapped_value),
        koan!(GROUP, 8, overrides_can_reuse_the_default),
        koan!(GROUP, 9, other_methods_can_reuse_the_default_too),
    ]
}

// ============================================================================
// Fixtures
// ============================================================================

/// The bark every dog starts with.
fn default_bark() -> String {
    "WOOF".to_string()
}

trait Dog {
    fn name(&self) -> &str;

    fn bark(&self) -> String {
        default_bark()
    }
}

struct Mutt {
    name: String,
}

impl Mutt {
    fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

impl Dog for Mutt {
    fn name(&self) -> &str {
        &self.name
    }
}

struct Chihuahua {
    name: String,
}

impl Chihuahua {
    fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }

    fn wag(&self) -> &'static str {
        "Happy"
    }
}

impl Default for Chihuahua {
    fn default() -> Self {
        Self::new("Ima Chihuahua")
    }
}

impl Dog for Chihuahua {
    fn name(&self) -> &str {
        &self.name
    }

    fn bark(&self) -> String {
        "yip".to_string()
    }
}

/// Wraps a chihuahua and defines its own `wag`.
struct ReallyYippyChihuahua {
    inner: Chihuahua,
}

impl ReallyYippyChihuahua {
    fn new(name: &str) -> Self {
        Self {
            inner: Chihuahua::new(name),
        }
    }

    fn wag(&self) -> &'static str {
        "WAG WAG WAG!!"
    }

    fn as_chihuahua(&self) -> &Chihuahua {
        &self.inner
    }
}

struct BullDog {
    name: String,
}

impl Dog for BullDog {
    fn name(&self) -> &str {
        &self.name
    }

    fn bark(&self) -> String {
        format!("{}, GROWL", default_bark())
    }
}

struct GreatDane {
    name: String,
}

impl GreatDane {
    fn growl(&self) -> String {
        format!("{}, GROWL", self.bark())
    }
}

impl Dog for GreatDane {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Koans
// ============================================================================

fn implementors_can_stand_in_for_the_trait() -> CheckResult {
    let pack: Vec<Box<dyn Dog>> = vec![Box::new(Mutt::new("Fluffy")), Box::new(Chihuahua::new("Chico"))];
    let names: Vec<&str> = pack.iter().map(|d| d.name()).collect();
    expect_eq(vec!["Fluffy", "Chico"], names)
}

fn every_static_type_is_any() -> CheckResult {
    let boxed: Box<dyn Any> = Box::new(Chihuahua::default());
    expect_true(boxed.is::<Chihuahua>(), "the boxed value to be a Chihuahua")?;
    expect_true(!boxed.is::<Mutt>(), "the boxed value not to be a Mutt")?;

    let chihuahua = boxed.downcast::<Chihuahua>().map_err(|_| "downcast to Chihuahua failed")?;
    expect_eq("Ima Chihuahua", chihuahua.name())
}

fn implementors_share_default_behavior() -> CheckResult {
    let chico = Chihuahua::new("Chico");
    expect_eq("Chico", chico.name())?;

    let fido = Mutt::new("Fido");
    expect_eq("WOOF".to_string(), fido.bark())
}

fn implementors_add_new_behavior() -> CheckResult {
    let chico = Chihuahua::new("Chico");
    expect_eq("Happy", chico.wag())
    // `Mutt::new("Fluffy").wag()` does not compile: you can't wag the dog.
}

fn implementors_can_override_default_behavior() -> CheckResult {
    let chico = Chihuahua::new("Chico");
    expect_eq("yip".to_string(), chico.bark())?;

    // Through a trait object the override still wins.
    let as_dog: &dyn Dog = &chico;
    expect_eq("yip".to_string(), as_dog.bark())?;

    let fido = Mutt::new("Fido");
    expect_eq("WOOF".to_string(), fido.bark())
}

fn wrappers_can_shadow_methods() -> CheckResult {
    let suzie = ReallyYippyChihuahua::new("Suzie");
    expect_eq("WAG WAG WAG!!", suzie.wag())
}

fn shadowing_does_not_change_the_wrapped_value() -> CheckResult {
    let bennie = ReallyYippyChihuahua::new("Bennie");
    // Which `wag` runs depends on the type you call it on.
    expect_eq("Happy", bennie.as_chihuahua().wag())?;
    expect_eq("Bennie", bennie.as_chihuahua().name())
}

fn overrides_can_reuse_the_default() -> CheckResult {
    let ralph = BullDog {
        name: "Ralph".to_string(),
    };
    expect_eq("WOOF, GROWL".to_string(), ralph.bark())?;
    expect_eq("Ralph", ralph.name())
}

fn other_methods_can_reuse_the_default_too() -> CheckResult {
    let george = GreatDane {
        name: "George".to_string(),
    };
    expect_eq("WOOF, GROWL".to_string(), george.growl())?;
    expect_eq("George", george.name())
}
