pub mod account;
pub mod address;
pub mod discover;
pub mod profile;

use hirify_core::navigation::Redirect;

/// Prints where the user is sent next.
pub fn announce(message: &str, redirect: Redirect) {
    println!("{}", message);
    println!(
        "Next: {} (after {} ms)",
        redirect.route.path(),
        redirect.delay.as_millis()
    );
}
