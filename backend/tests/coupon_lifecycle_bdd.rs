//! Behavioural tests for issuing and redeeming a coupon over HTTP.

#[allow(
    dead_code,
    reason = "Shared helpers include functions used only by other integration suites."
)]
#[path = "support/coupon_app.rs"]
mod coupon_app;

use std::sync::Mutex;

use coupon_app::{CouponApp, Reply};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;

const CODE: &str = "ZK8X2Q1B";

struct LifecycleWorld {
    app: CouponApp,
    last: Option<Reply>,
}

#[fixture]
fn world() -> Mutex<LifecycleWorld> {
    Mutex::new(LifecycleWorld {
        app: CouponApp::new(),
        last: None,
    })
}

fn last_body(world: &LifecycleWorld) -> &Value {
    let reply = world.last.as_ref().expect("a request was sent");
    assert_eq!(reply.status, 200, "unexpected reply: {:?}", reply.body);
    &reply.body
}

#[given("a catalogue with Gangnam and Jongno locations")]
fn a_catalogue_with_two_locations(world: &Mutex<LifecycleWorld>) {
    world.lock().expect("world lock").app.seed_catalogue();
}

#[given("coupon ZK8X2Q1B is issued at loc-gangnam")]
fn coupon_is_issued(world: &Mutex<LifecycleWorld>) {
    let world = world.lock().expect("world lock");
    let reply = world.app.issue("loc-gangnam", CODE);
    assert_eq!(reply.status, 201, "issue failed: {:?}", reply.body);
    assert_eq!(reply.body["coupon"]["isUsed"], Value::Bool(false));
}

#[when("the Gangnam cafe redeems the code in lower case")]
fn cafe_redeems_lower_case(world: &Mutex<LifecycleWorld>) {
    let mut world = world.lock().expect("world lock");
    let reply = world
        .app
        .redeem("store-cafe-gangnam", &CODE.to_ascii_lowercase());
    world.last = Some(reply);
}

#[when("the Gangnam cafe redeems the code again")]
fn cafe_redeems_again(world: &Mutex<LifecycleWorld>) {
    let mut world = world.lock().expect("world lock");
    let reply = world.app.redeem("store-cafe-gangnam", CODE);
    world.last = Some(reply);
}

#[when("the Jongno bakery redeems the code")]
fn bakery_redeems(world: &Mutex<LifecycleWorld>) {
    let mut world = world.lock().expect("world lock");
    let reply = world.app.redeem("store-bakery-jongno", CODE);
    world.last = Some(reply);
}

#[then("the redemption is accepted at Cafe Gangnam")]
fn redemption_is_accepted(world: &Mutex<LifecycleWorld>) {
    let world = world.lock().expect("world lock");
    let body = last_body(&world);
    assert_eq!(body["isValid"], Value::Bool(true));
    assert_eq!(body["isUsed"], Value::Bool(false));
    assert_eq!(body["code"], CODE);
    assert_eq!(body["store"]["slug"], "store-cafe-gangnam");
    assert_eq!(
        body["message"],
        "Gangnam visit coupon redeemed at Cafe Gangnam"
    );
}

#[then("the coupon is reported as already used at Cafe Gangnam")]
fn coupon_is_already_used(world: &Mutex<LifecycleWorld>) {
    let world = world.lock().expect("world lock");
    let body = last_body(&world);
    assert_eq!(body["isValid"], Value::Bool(true));
    assert_eq!(body["isUsed"], Value::Bool(true));
    assert_eq!(body["redeemedBy"]["name"], "Cafe Gangnam");
    assert_eq!(
        body["message"],
        "This coupon was already used at Cafe Gangnam"
    );
}

#[then("the code is not valid at that store")]
fn code_is_not_valid(world: &Mutex<LifecycleWorld>) {
    let world = world.lock().expect("world lock");
    let body = last_body(&world);
    assert_eq!(body["isValid"], Value::Bool(false));
    assert_eq!(body["isUsed"], Value::Bool(false));
    assert!(body.get("store").is_none());
}

#[then("the system statistics show one used coupon on repeated reads")]
fn statistics_are_stable(world: &Mutex<LifecycleWorld>) {
    let world = world.lock().expect("world lock");
    let first = world.app.get("/stats");
    let second = world.app.get("/stats");
    assert_eq!(first.status, 200);
    assert_eq!(first.body, second.body);
    assert_eq!(first.body["totalCoupons"], 1);
    assert_eq!(first.body["usedCoupons"], 1);
    assert_eq!(first.body["usageRate"], 100);
    assert_eq!(first.body["activeStores"], 2);
}

#[scenario(path = "tests/features/coupon_lifecycle.feature")]
fn coupon_lifecycle(world: Mutex<LifecycleWorld>) {
    drop(world);
}
