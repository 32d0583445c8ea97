use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=Cargo.toml");

    generate_header();
}

fn generate_header() {
    let version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let header = format!(
        r#"#pragma once

// Auto-generated by build.rs
// Do not edit manually!

#define POSE_WEIGHTS_VERSION "{version}"
#define POSE_WEIGHTS_VERSION_MAJOR {major}
#define POSE_WEIGHTS_VERSION_MINOR {minor}
#define POSE_WEIGHTS_VERSION_PATCH {patch}

#define PW_OK 0
#define PW_ERR_MISMATCHED_LENGTHS -1
#define PW_ERR_NULL_BUFFER -2
#define PW_ERR_INVALID_PARAMS -3
#define PW_ERR_PARALLEL -4
#define PW_ERR_PANIC -5

/**
 * All buffers are row-major.
 * wp is Nx1 (output)
 * xp is Nx7, [qw, qx, qy, qz, tx, ty, tz] world -> camera
 * cameraParams is 3x3
 * imagePoints is Fx2
 * worldPoints is Fx3
 */
typedef struct System {{
    double *wp;
    const double *xp;
    const double *cameraParams;
    const double *imagePoints;
    const double *worldPoints;
    unsigned int N;
    unsigned int F;
}} System;

#ifdef __cplusplus
extern "C" {{
#endif // __cplusplus

int updateWeights_cpu(System input);
int updateWeights_gpu(System input);

#ifdef __cplusplus
}} // extern "C"
#endif // __cplusplus
"#,
        version = version,
        major = version.split('.').next().unwrap_or("0"),
        minor = version.split('.').nth(1).unwrap_or("0"),
        patch = version.split('.').nth(2).unwrap_or("0"),
    );

    fs::write(out_dir.join("pose_weights.h"), &header).expect("Failed to write pose_weights.h");

    // Also write to include directory for development
    let include_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap()).join("include");

    if let Err(e) = fs::create_dir_all(&include_dir) {
        println!("cargo:warning=could not create include dir: {}", e);
    }

    if let Err(e) = fs::write(include_dir.join("pose_weights.h"), &header) {
        println!("cargo:warning=could not write pose_weights.h: {}", e);
    }
}
