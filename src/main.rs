use clap::{arg, command, value_parser};
use lbm_periodic_pressure as lbm;
use lbm_periodic_pressure::simulation::SimulationConfig;
use rayon::ThreadPoolBuilder;

fn main() {
    let matches = command!()
        .arg(
            arg!(
                -n --number_of_threads <NUMBER_OF_THREADS> "Sets the number of rayon threads"
            )
            .required(false)
            .default_value("1")
            .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(
                -x --nx <NX> "Number of lattice cells along the pressure axis"
            )
            .required(false)
            .default_value("64")
            .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(
                -y --ny <NY> "Number of lattice cells along y"
            )
            .required(false)
            .default_value("16")
            .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(
                -z --nz <NZ> "Number of lattice cells along z"
            )
            .required(false)
            .default_value("16")
            .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(
                -t --tau <TAU> "Relaxation time"
            )
            .required(false)
            .default_value("0.8")
            .value_parser(value_parser!(lbm::Float)),
        )
        .arg(
            arg!(
                --rho_in <RHO_IN> "Prescribed density at the inlet plane"
            )
            .required(false)
            .default_value("1.02")
            .value_parser(value_parser!(lbm::Float)),
        )
        .arg(
            arg!(
                --rho_out <RHO_OUT> "Prescribed density at the outlet plane"
            )
            .required(false)
            .default_value("0.98")
            .value_parser(value_parser!(lbm::Float)),
        )
        .arg(
            arg!(
                -i --max_iter <MAX_ITER> "Number of time steps"
            )
            .required(false)
            .default_value("1000")
            .value_parser(value_parser!(usize)),
        )
        .arg(
            arg!(
                -w --write_frequency <WRITE_FREQUENCY> "Steps between console/file reports"
            )
            .required(false)
            .default_value("100")
            .value_parser(value_parser!(usize)),
        )
        .get_matches();

    if let Some(&num_threads) = matches.get_one::<usize>("number_of_threads") {
        ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .unwrap();
    }

    let config = SimulationConfig {
        nx: *matches.get_one::<usize>("nx").unwrap(),
        ny: *matches.get_one::<usize>("ny").unwrap(),
        nz: *matches.get_one::<usize>("nz").unwrap(),
        tau: *matches.get_one::<lbm::Float>("tau").unwrap(),
        rho_in: *matches.get_one::<lbm::Float>("rho_in").unwrap(),
        rho_out: *matches.get_one::<lbm::Float>("rho_out").unwrap(),
        max_iter: *matches.get_one::<usize>("max_iter").unwrap(),
        write_frequency: *matches.get_one::<usize>("write_frequency").unwrap(),
    };

    lbm::simulation::run(config);
}
