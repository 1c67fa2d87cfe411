pub mod behavior;
pub mod contact;
pub mod timing;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
