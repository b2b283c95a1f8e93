fn main() {
    // Windows builds get an icon and version info; other targets need nothing
    #[cfg(target_os = "windows")]
    {
        let mut res = winres::WindowsResource::new();
        if std::path::Path::new("assets/fileshift.ico").exists() {
            res.set_icon("assets/fileshift.ico");
        }
        res.set("FileDescription", "fileshift file format converter");
        res.set("ProductName", "fileshift");
        res.set("ProductVersion", env!("CARGO_PKG_VERSION"));

        if let Err(e) = res.compile() {
            eprintln!("Warning: could not embed Windows resources: {}", e);
        }
    }
}
