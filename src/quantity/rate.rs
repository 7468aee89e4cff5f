// Electric-car energy consumption over distance.
quantity!(KilowattHoursPer100Km, f64, "kWh/100 km");
