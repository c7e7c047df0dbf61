fn main() {
    radar_kinematics::cli::run();
}
