// ABOUTME: Test support utilities.
// ABOUTME: Mock store and deploy API, scratch git repos, local HTTP fixture.

// Each test binary only uses some of these modules, so allow dead_code.
#[allow(dead_code)]
pub mod http;
#[allow(dead_code)]
pub mod mock;
#[allow(dead_code)]
pub mod repo;
