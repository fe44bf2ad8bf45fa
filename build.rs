fn main() {
    slint_build::compile("ui/appwindow.slint").expect("Slint build failed");
}
