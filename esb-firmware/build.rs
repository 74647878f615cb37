// Build-Script: Wird vor dem Kompilieren ausgeführt
// Konfiguriert den Linker für nRF52840 Embedded Rust

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    // memory.x ins OUT_DIR kopieren, damit cortex-m-rt es findet
    // (link.x bindet memory.x per INCLUDE ein)
    let out = PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    // Nur neu bauen wenn sich das Memory-Layout ändert
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    // Registriere hilfsbereiten Error-Handler für Linker-Fehler
    linker_be_nice();

    // Füge Linker-Skripte hinzu:

    // 1. link.x - Cortex-M Memory-Layout und Vektortabelle (cortex-m-rt)
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");

    // 2. defmt.x - defmt Logging-Support
    //    Definiert Symbole für defmt's binäres Log-Format
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

// Error-Handler: Zeigt hilfreiche Tipps bei Linker-Fehlern
// Wird vom Linker als "--error-handling-script" aufgerufen
fn linker_be_nice() {
    let args: Vec<String> = std::env::args().collect();

    // Wenn vom Linker aufgerufen (mit Error-Typ und Symbol-Name)
    if args.len() > 2 {
        let kind = &args[1]; // Fehler-Typ (z.B. "undefined-symbol")
        let what = &args[2]; // Symbol-Name (z.B. "_defmt_...")

        match kind.as_str() {
            "undefined-symbol" => match what.as_str() {
                what if what.starts_with("_defmt_") => {
                    eprintln!();
                    eprintln!(
                        "💡 `defmt` not found - make sure `defmt.x` is added as a linker script and you have included `use defmt_rtt as _;`"
                    );
                    eprintln!();
                }
                "_stack_start" | "__RESET_VECTOR" => {
                    eprintln!();
                    eprintln!("💡 Is the linker script `link.x` (cortex-m-rt) or `memory.x` missing?");
                    eprintln!();
                }
                "__INTERRUPTS" => {
                    eprintln!();
                    eprintln!(
                        "💡 No interrupt vector table - enable the `rt` feature of the PAC (embassy-nrf does this by default)"
                    );
                    eprintln!();
                }
                _ => (),
            },
            _ => {
                std::process::exit(1);
            }
        }

        std::process::exit(0);
    }

    println!(
        "cargo:rustc-link-arg-bins=--error-handling-script={}",
        std::env::current_exe().unwrap().display()
    );
}
