#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Sitewire wasm entry point. Built natively, it prints the default page
//! config block so it can be pasted into a page and edited.

#[cfg(target_arch = "wasm32")]
fn main() {
    sitewire_ui::run_enhancer();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::io::{self, Write};

    writeln!(
        io::stderr().lock(),
        "sitewire-ui enhances pages from wasm32 (`trunk build`); default config block follows."
    )?;
    write_config_block(&mut io::stdout().lock())?;
    Ok(())
}

/// Write `<script id="swf-config">` holding every default, ready to trim down.
#[cfg(not(target_arch = "wasm32"))]
fn write_config_block(out: &mut impl std::io::Write) -> Result<(), Box<dyn std::error::Error>> {
    use sitewire_ui::core::config::{CONFIG_ELEMENT_ID, PageConfig};

    let json = PageConfig::default().to_json_pretty()?;
    writeln!(out, r#"<script type="application/json" id="{CONFIG_ELEMENT_ID}">"#)?;
    writeln!(out, "{json}")?;
    writeln!(out, "</script>")?;
    Ok(())
}
