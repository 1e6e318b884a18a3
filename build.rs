#[cfg(target_os = "windows")]
fn main() {
    use std::path::Path;
    use winresource::WindowsResource;

    let mut res = WindowsResource::new();
    if Path::new("res/loomshift.ico").exists() {
        res.set_icon("res/loomshift.ico");
    }
    res.set("FileDescription", "loomshift CLI")
        .set("ProductName", "loomshift")
        .set("OriginalFilename", "loomshift.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"));

    if let Err(e) = res.compile() {
        println!("cargo:warning=failed to embed Windows resources: {e}");
    }
}

#[cfg(not(target_os = "windows"))]
fn main() {}
