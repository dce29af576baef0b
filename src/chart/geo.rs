/// Approximate geographic centroids `(CCA3, longitude, latitude)`, used to
/// place a cell for countries the boundaries file does not cover.
const CENTROIDS: &[(&str, f64, f64)] = &[
    ("ABW", -69.97, 12.52),
    ("AFG", 66.0, 33.9),
    ("AGO", 17.9, -11.2),
    ("AIA", -63.05, 18.22),
    ("ALB", 20.0, 41.1),
    ("AND", 1.58, 42.55),
    ("ARE", 54.3, 23.9),
    ("ARG", -64.0, -34.0),
    ("ARM", 44.9, 40.1),
    ("ASM", -170.7, -14.3),
    ("ATG", -61.8, 17.1),
    ("AUS", 134.0, -25.0),
    ("AUT", 14.1, 47.6),
    ("AZE", 47.6, 40.3),
    ("BDI", 29.9, -3.4),
    ("BEL", 4.6, 50.6),
    ("BEN", 2.3, 9.6),
    ("BFA", -1.7, 12.3),
    ("BGD", 90.3, 23.8),
    ("BGR", 25.2, 42.8),
    ("BHR", 50.6, 26.0),
    ("BHS", -77.4, 24.7),
    ("BIH", 17.8, 44.2),
    ("BLM", -62.85, 17.9),
    ("BLR", 28.0, 53.5),
    ("BLZ", -88.7, 17.2),
    ("BMU", -64.75, 32.3),
    ("BOL", -64.7, -16.7),
    ("BRA", -53.1, -10.8),
    ("BRB", -59.56, 13.17),
    ("BRN", 114.7, 4.5),
    ("BTN", 90.4, 27.4),
    ("BWA", 23.8, -22.2),
    ("CAF", 20.5, 6.6),
    ("CAN", -98.3, 61.4),
    ("CHE", 8.2, 46.8),
    ("CHL", -71.0, -37.7),
    ("CHN", 103.8, 36.6),
    ("CIV", -5.6, 7.6),
    ("CMR", 12.7, 5.7),
    ("COD", 23.6, -2.9),
    ("COG", 15.2, -0.8),
    ("COK", -159.8, -21.2),
    ("COL", -73.1, 3.9),
    ("COM", 43.7, -11.9),
    ("CPV", -23.9, 15.1),
    ("CRI", -84.2, 9.97),
    ("CUB", -79.0, 21.6),
    ("CUW", -68.97, 12.2),
    ("CYM", -81.25, 19.3),
    ("CYP", 33.0, 35.0),
    ("CZE", 15.3, 49.7),
    ("DEU", 10.4, 51.1),
    ("DJI", 42.6, 11.7),
    ("DMA", -61.36, 15.44),
    ("DNK", 10.0, 56.0),
    ("DOM", -70.5, 18.9),
    ("DZA", 2.6, 28.2),
    ("ECU", -78.4, -1.4),
    ("EGY", 29.9, 26.5),
    ("ERI", 38.8, 15.4),
    ("ESH", -12.9, 24.2),
    ("ESP", -3.6, 40.2),
    ("EST", 25.5, 58.7),
    ("ETH", 39.6, 8.6),
    ("FIN", 26.3, 64.5),
    ("FJI", 178.0, -17.4),
    ("FLK", -59.4, -51.7),
    ("FRA", 2.5, 46.6),
    ("FRO", -6.9, 62.0),
    ("FSM", 158.2, 6.9),
    ("GAB", 11.8, -0.6),
    ("GBR", -2.9, 54.1),
    ("GEO", 43.5, 42.2),
    ("GGY", -2.58, 49.46),
    ("GHA", -1.2, 7.95),
    ("GIB", -5.35, 36.14),
    ("GIN", -11.0, 10.4),
    ("GLP", -61.55, 16.2),
    ("GMB", -15.4, 13.45),
    ("GNB", -15.0, 12.0),
    ("GNQ", 10.4, 1.6),
    ("GRC", 22.6, 39.1),
    ("GRD", -61.68, 12.1),
    ("GRL", -41.3, 74.7),
    ("GTM", -90.4, 15.7),
    ("GUF", -53.2, 3.9),
    ("GUM", 144.8, 13.44),
    ("GUY", -58.97, 4.8),
    ("HKG", 114.15, 22.35),
    ("HND", -86.6, 14.8),
    ("HRV", 16.4, 45.1),
    ("HTI", -72.7, 18.9),
    ("HUN", 19.4, 47.2),
    ("IDN", 117.2, -2.2),
    ("IMN", -4.5, 54.2),
    ("IND", 79.6, 22.9),
    ("IRL", -8.1, 53.2),
    ("IRN", 54.3, 32.6),
    ("IRQ", 43.7, 33.0),
    ("ISL", -18.6, 65.0),
    ("ISR", 35.0, 31.5),
    ("ITA", 12.1, 42.8),
    ("JAM", -77.3, 18.1),
    ("JEY", -2.13, 49.21),
    ("JOR", 36.8, 31.2),
    ("JPN", 138.0, 37.6),
    ("KAZ", 67.3, 48.2),
    ("KEN", 37.8, 0.6),
    ("KGZ", 74.5, 41.5),
    ("KHM", 104.9, 12.7),
    ("KIR", 173.0, 1.4),
    ("KNA", -62.7, 17.3),
    ("KOR", 127.8, 36.4),
    ("KWT", 47.6, 29.3),
    ("LAO", 103.8, 18.5),
    ("LBN", 35.9, 33.9),
    ("LBR", -9.3, 6.45),
    ("LBY", 17.9, 27.0),
    ("LCA", -60.97, 13.9),
    ("LIE", 9.55, 47.15),
    ("LKA", 80.7, 7.6),
    ("LSO", 28.2, -29.6),
    ("LTU", 23.9, 55.3),
    ("LUX", 6.1, 49.8),
    ("LVA", 24.9, 56.9),
    ("MAC", 113.55, 22.2),
    ("MAF", -63.06, 18.08),
    ("MAR", -6.3, 31.9),
    ("MCO", 7.42, 43.74),
    ("MDA", 28.5, 47.2),
    ("MDG", 46.7, -19.4),
    ("MDV", 73.2, 3.2),
    ("MEX", -102.5, 23.9),
    ("MHL", 171.0, 7.1),
    ("MKD", 21.7, 41.6),
    ("MLI", -2.0, 17.4),
    ("MLT", 14.4, 35.9),
    ("MMR", 96.5, 21.0),
    ("MNE", 19.3, 42.8),
    ("MNG", 103.1, 46.8),
    ("MNP", 145.7, 15.2),
    ("MOZ", 35.5, -17.3),
    ("MRT", -10.3, 20.3),
    ("MSR", -62.19, 16.74),
    ("MTQ", -61.0, 14.65),
    ("MUS", 57.57, -20.28),
    ("MWI", 34.3, -13.2),
    ("MYS", 109.7, 3.8),
    ("MYT", 45.15, -12.8),
    ("NAM", 17.2, -22.1),
    ("NCL", 165.7, -21.3),
    ("NER", 9.4, 17.4),
    ("NGA", 8.1, 9.6),
    ("NIC", -85.0, 12.85),
    ("NIU", -169.87, -19.05),
    ("NLD", 5.6, 52.2),
    ("NOR", 15.5, 64.5),
    ("NPL", 83.9, 28.3),
    ("NRU", 166.93, -0.52),
    ("NZL", 172.0, -41.8),
    ("OMN", 56.1, 20.6),
    ("PAK", 69.4, 29.9),
    ("PAN", -80.1, 8.5),
    ("PER", -74.4, -9.2),
    ("PHL", 122.9, 11.8),
    ("PLW", 134.6, 7.5),
    ("PNG", 145.2, -6.5),
    ("POL", 19.4, 52.1),
    ("PRI", -66.5, 18.2),
    ("PRK", 127.2, 40.2),
    ("PRT", -8.5, 39.6),
    ("PRY", -58.4, -23.2),
    ("PSE", 35.2, 31.9),
    ("PYF", -149.4, -17.6),
    ("QAT", 51.2, 25.3),
    ("REU", 55.5, -21.1),
    ("ROU", 25.0, 45.9),
    ("RUS", 96.7, 61.98),
    ("RWA", 29.9, -2.0),
    ("SAU", 44.5, 24.1),
    ("SDN", 29.9, 16.0),
    ("SEN", -14.5, 14.4),
    ("SGP", 103.8, 1.35),
    ("SHN", -5.7, -15.95),
    ("SLB", 160.0, -9.6),
    ("SLE", -11.8, 8.6),
    ("SLV", -88.9, 13.7),
    ("SMR", 12.46, 43.94),
    ("SOM", 45.9, 6.0),
    ("SPM", -56.3, 46.9),
    ("SRB", 20.8, 44.2),
    ("SSD", 30.2, 7.3),
    ("STP", 6.7, 0.3),
    ("SUR", -55.9, 4.1),
    ("SVK", 19.5, 48.7),
    ("SVN", 14.9, 46.1),
    ("SWE", 16.7, 62.8),
    ("SWZ", 31.5, -26.6),
    ("SXM", -63.06, 18.04),
    ("SYC", 55.5, -4.6),
    ("SYR", 38.5, 35.0),
    ("TCA", -71.8, 21.8),
    ("TCD", 18.7, 15.3),
    ("TGO", 0.98, 8.5),
    ("THA", 101.0, 15.1),
    ("TJK", 71.0, 38.5),
    ("TKL", -171.8, -9.2),
    ("TKM", 59.4, 39.1),
    ("TLS", 125.8, -8.8),
    ("TON", -175.2, -21.2),
    ("TTO", -61.3, 10.4),
    ("TUN", 9.5, 34.1),
    ("TUR", 35.2, 39.1),
    ("TUV", 179.2, -8.5),
    ("TWN", 121.0, 23.7),
    ("TZA", 34.8, -6.3),
    ("UGA", 32.4, 1.3),
    ("UKR", 31.4, 49.0),
    ("URY", -56.0, -32.8),
    ("USA", -98.6, 39.8),
    ("UZB", 63.1, 41.8),
    ("VAT", 12.45, 41.9),
    ("VCT", -61.2, 13.25),
    ("VEN", -66.2, 7.1),
    ("VGB", -64.6, 18.4),
    ("VIR", -64.8, 17.95),
    ("VNM", 106.3, 16.6),
    ("VUT", 167.7, -15.4),
    ("WLF", -176.2, -13.3),
    ("WSM", -172.2, -13.75),
    ("XKX", 20.9, 42.6),
    ("YEM", 47.6, 15.9),
    ("ZAF", 25.1, -29.0),
    ("ZMB", 27.8, -13.5),
    ("ZWE", 29.9, -19.0),
];

/// `[longitude, latitude]` of a country by ISO-3 code (case-insensitive).
pub fn centroid(cca3: &str) -> Option<[f64; 2]> {
    let code = cca3.trim();
    CENTROIDS
        .iter()
        .find(|(c, _, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, lon, lat)| [*lon, *lat])
}
