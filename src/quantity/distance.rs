quantity!(Kilometers, f64, "km");
