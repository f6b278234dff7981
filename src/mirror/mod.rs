pub mod apkcombo;
pub mod apkpure;
