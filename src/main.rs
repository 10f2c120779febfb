fn main() {
    polygon_workspace::run();
}
