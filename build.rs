fn main() {
    // Compile the popup panel
    slint_build::compile("ui/main.slint").unwrap();

    // Embed Windows resources (version info)
    #[cfg(windows)]
    {
        let mut res = winres::WindowsResource::new();
        res.set("ProductName", "MonitorTray");
        res.set("FileDescription", "Monitor brightness and contrast control");
        res.set("CompanyName", "MonitorTray Contributors");
        res.set("OriginalFilename", "monitor-tray.exe");
        res.set("FileVersion", env!("CARGO_PKG_VERSION"));
        res.set("ProductVersion", env!("CARGO_PKG_VERSION"));
        res.compile().unwrap();
    }
}
